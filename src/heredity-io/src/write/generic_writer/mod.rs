use std::{fs::File, io::{Write, BufWriter}, path::Path};

use anyhow::Result;
use regex::Regex;
use lazy_static::lazy_static;

use located_error::LocatedError;

mod error;
pub use error::WriterError;

/// THE field separator used for this generic writer.
pub const WRITER_SEPARATOR: &str = "\t";

/// A generic writer, targeting either a file or stdout.
/// - source: Boxed `BufWriter`
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`, linked to a file, or to stdout if `path` is `None`.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>> {
        Ok(GenericWriter{ source: match path {
            Some(path) => {
                let path = path.as_ref();
                let file = File::create(path)
                    .map_err(WriterError::CreateFile)
                    .with_loc(|| format!("While creating file '{}'", path.display()))?;
                BufWriter::new(Box::new(file))
            },
            None => BufWriter::new(Box::new(std::io::stdout()))
        }})
    }

    /// Instantiate a new `GenericWriter` around any writable sink.
    pub fn from_writer(sink: impl Write + 'a) -> GenericWriter<'a> {
        GenericWriter { source: BufWriter::new(Box::new(sink)) }
    }

    /// Write the contents of a generic iterator. One iteration step = one line.
    ///
    /// # Behavior
    /// For each item of the iterator, `write_iter` will search for the regular expression
    /// `[ ]+-[ ]+` and replace matches with `\t`. This effectively removes "Pretty-print"
    /// from the output.
    ///
    /// # Errors
    /// - If any of the Items within `iter` fails to get written.
    ///
    /// # Panics
    /// - if parsing the regex required to delete pretty-print characters fails.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: std::fmt::Display,
    {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"[ ]+-[ ]+").expect("Failed to parse regex.");
        }
        iter.into_iter()
            .try_for_each(|obj| self.source.write_all(RE.replace_all(&format!("{obj}\n"), WRITER_SEPARATOR).as_bytes()))
            .map_err(WriterError::IOError)
            .loc("While writing contents into file")?;

        self.source.flush()
            .map_err(WriterError::IOError)
            .loc("While flushing buffer contents of Writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("family0.posteriors");
        let mut writer = GenericWriter::new(Some(&path))?;

        writer.write_iter(["name - gene_2 - gene_1", "Harry - 0.0092 - 0.4557"])?;

        let got = std::fs::read_to_string(path)?;
        assert_eq!(got, "name\tgene_2\tgene_1\nHarry\t0.0092\t0.4557\n");
        Ok(())
    }

    #[test]
    fn negative_numbers_are_kept() -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        {
            let mut writer = GenericWriter::from_writer(&mut buffer);
            writer.write_iter(["a - -1.5 - b"])?;
        }
        assert_eq!(String::from_utf8(buffer)?, "a\t-1.5\tb\n");
        Ok(())
    }

    #[test]
    fn invalid_path() {
        let result = GenericWriter::new(Some("/this/directory/does/not/exist/file.txt"));
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<WriterError>(), Some(WriterError::CreateFile(_)))));
    }
}
