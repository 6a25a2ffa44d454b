// chromaconv/src/scale_test.rs

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::scale::{read_table, write_csv, ScaleRow, DATA_OFFSET, FACTOR_OFFSET};
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    fn setup_test_dir(test_name: &str) -> io::Result<PathBuf> {
        let dir = PathBuf::from(format!("target/test_scale_{test_name}"));
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn cleanup_test_dir(dir: &Path) {
        if dir.exists() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    // Zero-filled preamble with the factor patched in, then rows
    fn scale_file(factor: i32, rows: &[(f32, [i32; 22])]) -> Vec<u8> {
        let mut bytes = vec![0u8; DATA_OFFSET as usize];
        bytes[FACTOR_OFFSET as usize..FACTOR_OFFSET as usize + 4]
            .copy_from_slice(&factor.to_le_bytes());
        for (time, raw_values) in rows {
            bytes.extend_from_slice(b"HH");
            bytes.extend_from_slice(&time.to_le_bytes());
            for raw in raw_values {
                bytes.extend_from_slice(&raw.to_be_bytes());
            }
        }
        bytes
    }

    #[test]
    fn test_read_table_applies_factor() -> io::Result<()> {
        let dir = setup_test_dir("factor")?;
        let path = dir.join("run");
        let mut raw = [1000i32; 22];
        raw[0] = 2500;
        raw[21] = -999; // truncates toward zero, not floor
        fs::write(&path, scale_file(10, &[(0.5, raw)]))?;

        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time_minutes, 0.5);
        assert_eq!(rows[0].values[0], 250);
        assert_eq!(rows[0].values[1], 100);
        assert_eq!(rows[0].values[21], -99);

        cleanup_test_dir(&dir);
        Ok(())
    }

    #[test]
    fn test_clean_eof_at_row_boundary() -> io::Result<()> {
        let dir = setup_test_dir("eof")?;
        let path = dir.join("run");
        fs::write(
            &path,
            scale_file(1, &[(0.1, [5i32; 22]), (0.2, [6i32; 22])]),
        )?;

        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].values, [6i32; 22]);

        cleanup_test_dir(&dir);
        Ok(())
    }

    #[test]
    fn test_bad_row_marker() -> io::Result<()> {
        let dir = setup_test_dir("marker")?;
        let path = dir.join("run");
        let mut bytes = scale_file(1, &[(0.1, [5i32; 22])]);
        // Corrupt the marker of a second row
        bytes.extend_from_slice(b"XX");
        bytes.extend(vec![0u8; 92]);
        fs::write(&path, bytes)?;

        let err = read_table(&path).unwrap_err();
        match err {
            DecodeError::BadRowMarker { offset } => {
                assert_eq!(offset, DATA_OFFSET + 94);
            }
            other => panic!("expected BadRowMarker, got {other:?}"),
        }

        cleanup_test_dir(&dir);
        Ok(())
    }

    #[test]
    fn test_truncated_row_body() -> io::Result<()> {
        let dir = setup_test_dir("truncated")?;
        let path = dir.join("run");
        let mut bytes = scale_file(1, &[]);
        bytes.extend_from_slice(b"HH");
        bytes.extend(vec![0u8; 50]); // 50 of 92 body bytes
        fs::write(&path, bytes)?;

        let err = read_table(&path).unwrap_err();
        match err {
            DecodeError::TruncatedRecord { expected, got, .. } => {
                assert_eq!(expected, 92);
                assert_eq!(got, 50);
            }
            other => panic!("expected TruncatedRecord, got {other:?}"),
        }

        cleanup_test_dir(&dir);
        Ok(())
    }

    #[test]
    fn test_zero_factor_rejected() -> io::Result<()> {
        let dir = setup_test_dir("zero_factor")?;
        let path = dir.join("run");
        fs::write(&path, scale_file(0, &[]))?;

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, DecodeError::ZeroFactor));

        cleanup_test_dir(&dir);
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let err = read_table(Path::new("target/no_such_scale_file")).unwrap_err();
        assert!(matches!(err, DecodeError::MissingInput { .. }));
    }

    #[test]
    fn test_csv_serialization() {
        let rows = vec![
            ScaleRow {
                time_minutes: 0.1,
                values: [1i32; 22],
            },
            ScaleRow {
                time_minutes: 0.2,
                values: [2i32; 22],
            },
        ];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Time (min),190,200,"));
        assert!(lines[0].ends_with(",390,400"));
        assert_eq!(lines[1], format!("0.1000,{}", ["1"; 22].join(",")));
        assert!(lines[2].starts_with("0.2000,2,"));
    }
}
