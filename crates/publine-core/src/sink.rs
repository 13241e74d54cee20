//! Output sink: CSV file writer with atomic tmp→rename

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Buffered CSV writer. Rows go to `<file>.tmp`; `finalize` renames it over the target.
pub struct CsvSink {
    writer: csv::Writer<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl CsvSink {
    /// Create a sink and write the header row.
    ///
    /// Missing parent directories are created. An existing file at `path` is
    /// replaced on `finalize`.
    pub fn create(path: &Path, header: &[&str]) -> io::Result<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )
        })?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record(header)?;

        Ok(Self {
            writer,
            tmp_path,
            final_path: path.to_path_buf(),
            row_count: 0,
        })
    }

    /// Write one data row. Fields are quoted only when they need it.
    pub fn write_row<I, T>(&mut self, record: I) -> io::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(record)?;
        self.row_count += 1;
        Ok(())
    }

    /// Finalize: flush and atomically rename tmp → final
    pub fn finalize(self) -> io::Result<usize> {
        let Self {
            mut writer,
            tmp_path,
            final_path,
            row_count,
        } = self;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &final_path)?;
        Ok(row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 3] = ["id", "name", "note"];

    #[test]
    fn header_only_when_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let sink = CsvSink::create(&path, &HEADER).unwrap();
        assert_eq!(sink.finalize().unwrap(), 0);

        assert_eq!(fs::read_to_string(&path).unwrap(), "id,name,note\n");
    }

    #[test]
    fn quotes_embedded_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path, &HEADER).unwrap();
        sink.write_row(["1", "Doe, Jane", "said \"hi\""]).unwrap();
        sink.write_row(["2", "plain", ""]).unwrap();
        assert_eq!(sink.finalize().unwrap(), 2);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,name,note\n1,\"Doe, Jane\",\"said \"\"hi\"\"\"\n2,plain,\n"
        );
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new file\n").unwrap();

        let mut sink = CsvSink::create(&path, &HEADER).unwrap();
        sink.write_row(["1", "a", "b"]).unwrap();
        sink.finalize().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "id,name,note\n1,a,b\n");
    }

    #[test]
    fn target_untouched_until_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "previous\n").unwrap();

        let mut sink = CsvSink::create(&path, &HEADER).unwrap();
        sink.write_row(["1", "a", "b"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n");
        assert!(dir.path().join("out.csv.tmp").exists());

        sink.finalize().unwrap();
        assert!(!dir.path().join("out.csv.tmp").exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");

        CsvSink::create(&path, &HEADER).unwrap().finalize().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rejects_path_without_file_name() {
        let err = CsvSink::create(Path::new("/"), &HEADER).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
