//! Y. Hatanaka numerical differentiation
use crate::hatanaka::Error;

/// Highest differentiation order we support
pub const MAX_ORDER: usize = 7;

/// [NumDiff] recovers integer series compressed with the recursive
/// differential equations defined by Y. Hatanaka.
/// One kernel is attached to one series (a clock offset, or one
/// observable of one satellite) and lives as long as the compression arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumDiff {
    /// Order of this arc
    order: usize,
    /// Differences available so far, grows up to `order`
    arc: usize,
    /// Latest value followed by its backward differences
    diffs: [i64; MAX_ORDER + 1],
}

impl NumDiff {
    /// Starts a new compression arc at given order.
    pub fn new(order: usize, value: i64) -> Result<Self, Error> {
        if order == 0 || order > MAX_ORDER {
            return Err(Error::CompressionOrder(order));
        }
        let mut diffs = [0; MAX_ORDER + 1];
        diffs[0] = value;
        Ok(Self {
            order,
            arc: 0,
            diffs,
        })
    }

    /// Latest recovered value
    pub fn value(&self) -> i64 {
        self.diffs[0]
    }

    /// Recovers next value from its compressed form
    pub fn decompress(&mut self, data: i64) -> i64 {
        self.arc = (self.arc + 1).min(self.order);
        self.diffs[self.arc] = data;
        for k in (0..self.arc).rev() {
            self.diffs[k] = self.diffs[k].wrapping_add(self.diffs[k + 1]);
        }
        self.diffs[0]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn test_decompression() {
        let mut diff = NumDiff::new(3, 25065408994).unwrap();
        let data: Vec<i64> = vec![5918760, 92440, -240, -320, -160, -580, 360, -1380, 220, -140];
        let expected: Vec<i64> = vec![
            25071327754,
            25077338954,
            25083442354,
            25089637634,
            25095924634,
            25102302774,
            25108772414,
            25115332174,
            25121982274,
            25128722574,
        ];
        for i in 0..data.len() {
            let recovered = diff.decompress(data[i]);
            assert_eq!(recovered, expected[i], "failed for {}th value", i + 1);
        }

        // new arc
        let mut diff = NumDiff::new(3, 24701300559).unwrap();
        assert_eq!(diff.value(), 24701300559);
        let data: Vec<i64> = vec![
            -19542118, 29235, -38, 1592, -931, 645, 1001, -1038, 2198, -2679, 2804, -892,
        ];
        let expected: Vec<i64> = vec![
            24681758441,
            24662245558,
            24642761872,
            24623308975,
            24603885936,
            24584493400,
            24565132368,
            24545801802,
            24526503900,
            24507235983,
            24488000855,
            24468797624,
        ];
        for i in 0..data.len() {
            let recovered = diff.decompress(data[i]);
            assert_eq!(recovered, expected[i], "failed for {}th value", i + 1);
        }
    }

    #[test]
    fn first_order_is_a_running_sum() {
        let mut diff = NumDiff::new(1, 100).unwrap();
        assert_eq!(diff.decompress(5), 105);
        assert_eq!(diff.decompress(5), 110);
        assert_eq!(diff.decompress(-10), 100);
    }

    #[test]
    fn order_range() {
        assert!(NumDiff::new(0, 1).is_err());
        assert!(NumDiff::new(8, 1).is_err());
        assert!(NumDiff::new(MAX_ORDER, 1).is_ok());
    }
}
