//! Y. Hatanaka lossless TextDiff algorithm

/// [TextDiff] recovers text compressed with the differential
/// algorithm designed by Y. Hatanaka: a blank keeps the previous
/// character, '&' stands for a blank, anything else replaces.
/// Input longer than the recovered text extends it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TextDiff {
    buffer: String,
}

impl TextDiff {
    /// Creates a new [TextDiff] initialized with given content
    pub fn new(data: &str) -> Self {
        Self {
            buffer: data.to_string(),
        }
    }

    /// Force kernel reset using new content
    pub fn force_init(&mut self, data: &str) {
        self.buffer = data.to_string();
    }

    /// Recovered text
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Decompresses given data. Returns recovered text.
    pub fn decompress(&mut self, data: &str) -> &str {
        let mut recovered = String::with_capacity(self.buffer.len().max(data.len()));
        let mut previous = self.buffer.chars();
        let mut data = data.chars();
        loop {
            match (previous.next(), data.next()) {
                (Some(prev), Some(' ')) => recovered.push(prev),
                (_, Some('&')) => recovered.push(' '),
                (_, Some(c)) => recovered.push(c),
                (Some(prev), None) => recovered.push(prev),
                (None, None) => break,
            }
        }
        self.buffer = recovered;
        &self.buffer
    }
}
