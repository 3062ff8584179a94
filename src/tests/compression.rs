#[cfg(test)]
mod test {
    use crate::{prelude::*, tests::toolkit::test_resource};
    use std::io::Cursor;

    const CRINEX: &str = "ESBC00DNK_R_20201770000_01D_30S_MO.crx";
    const RINEX: &str = "ESBC00DNK_R_20201770000_01D_30S_MO.rnx";

    fn plain_lines() -> Vec<String> {
        Loader::default()
            .load(test_resource("OBS", "V3", RINEX))
            .unwrap()
            .lines
    }

    #[test]
    fn hatanaka_requires_decoder() {
        let path = test_resource("CRNX", "V3", CRINEX);
        match Examination::from_file(&path) {
            Err(Error::Decompression {
                compression,
                reason,
            }) => {
                assert_eq!(compression, Compression::Hatanaka);
                assert_eq!(reason, "no decoder available");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn hatanaka_with_decoder() {
        let path = test_resource("CRNX", "V3", CRINEX);
        let loader = Loader::default().with_decoder(Hatanaka);
        let content = loader.load(&path).unwrap();
        assert_eq!(content.compression, Compression::Hatanaka);

        // recovers the original file
        let plain = plain_lines();
        assert_eq!(content.lines.len(), plain.len());
        for (recovered, expected) in content.lines.iter().zip(plain.iter()) {
            assert_eq!(recovered, expected.trim_end());
        }

        let dut = Examination::from_content(content);
        let mut expected = Examination::from_lines(&plain);
        expected.compression = Compression::Hatanaka;
        assert_eq!(dut, expected);
        assert_eq!(dut.header.version.as_deref(), Some("3.04"));
        assert_eq!(dut.observations.num_epochs, 4);

        let report = dut
            .report()
            .with_file_name(CRINEX)
            .with_support(loader.support())
            .to_string();
        assert!(report.contains("Compression: hatanaka\n"));
        assert!(report.contains("Total Epochs:      4\n"));
        #[cfg(feature = "flate2")]
        assert!(report.contains("✓ hatanaka decoder installed - hatanaka, hatanaka+gz supported"));
    }

    #[cfg(feature = "flate2")]
    #[test]
    fn gzip_compressed_hatanaka() {
        use flate2::{write::GzEncoder, Compression as Level};
        use std::io::Write;

        let crinex = std::fs::read(test_resource("CRNX", "V3", CRINEX)).unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Level::best());
        encoder.write_all(&crinex).unwrap();
        let compressed = encoder.finish().unwrap();

        let loader = Loader::default().with_decoder(Hatanaka);
        let content = loader
            .decode(&mut Cursor::new(compressed.clone()), Compression::HatanakaGzip)
            .unwrap();
        assert_eq!(content.compression, Compression::HatanakaGzip);

        let dut = Examination::from_content(content);
        assert_eq!(dut.compression, Compression::HatanakaGzip);
        assert_eq!(dut.observations, Examination::from_lines(&plain_lines()).observations);

        // plain gzip route does not undo the Hatanaka compression
        let content = loader
            .decode(&mut Cursor::new(compressed), Compression::Gzip)
            .unwrap();
        assert!(content.lines[0].contains("CRINEX VERS"));
    }

    #[test]
    fn corrupt_hatanaka() {
        let loader = Loader::default().with_decoder(Hatanaka);
        let plain = std::fs::read(test_resource("OBS", "V3", RINEX)).unwrap();
        match loader.decode(&mut Cursor::new(plain), Compression::Hatanaka) {
            Err(Error::Decompression {
                compression,
                reason,
            }) => {
                assert_eq!(compression, Compression::Hatanaka);
                assert_eq!(reason, "this is not a CRINEX file");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unreadable_file() {
        let path = test_resource("OBS", "V3", "DOES00NOT_R_20201770000_01D_30S_MO.rnx");
        match Examination::from_file(&path) {
            Err(Error::Io { path: failed, .. }) => {
                assert!(failed.ends_with("DOES00NOT_R_20201770000_01D_30S_MO.rnx"))
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
