use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::error::DseError;

/// # Description
/// the run status log of the driver
/// - opened once before any analysis
/// - closed by [`RunLog::close`], or by drop on an error path
#[derive(Debug)]
pub struct RunLog {
    out: BufWriter<File>,
}

impl RunLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DseError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| DseError::RunLog {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("run log opened at {}", path.display());
        Ok(RunLog {
            out: BufWriter::new(file),
        })
    }

    /// write one status line
    pub fn line(&mut self, line: impl AsRef<str>) -> Result<(), DseError> {
        writeln!(self.out, "{}", line.as_ref())?;
        Ok(())
    }

    pub fn close(mut self) -> Result<(), DseError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_log_lines() -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all("output")?;
        let path = "output/test_run_log.log";
        let mut log = RunLog::open(path)?;
        log.line("num_pes: 64")?;
        log.line(format!("bw_sweep:{}", false))?;
        log.close()?;
        assert_eq!(std::fs::read_to_string(path)?, "num_pes: 64\nbw_sweep:false\n");
        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_run_log_flushed_on_drop() -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all("output")?;
        let path = "output/test_run_log_drop.log";
        {
            let mut log = RunLog::open(path)?;
            log.line("top_bw_only:true")?;
        }
        assert_eq!(std::fs::read_to_string(path)?, "top_bw_only:true\n");
        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_open_failure() {
        let result = RunLog::open("output/no/such/dir/output.log");
        assert!(matches!(result, Err(DseError::RunLog { .. })));
    }
}
