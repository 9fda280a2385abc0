use std::path::{Path, PathBuf};

use crate::{AlignerError, Result, ScoreParams, DEFAULT_OUTPUT};

/// Everything one comparison run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    primary: PathBuf,
    reference: PathBuf,
    output: PathBuf,
    report_best: bool,
    score_params: ScoreParams,
}

impl RunConfig {
    /// `primary` is the file being scored, `reference` the file it is
    /// compared against.
    pub fn new<P: Into<PathBuf>, R: Into<PathBuf>>(primary: P, reference: R) -> Self {
        Self {
            primary: primary.into(),
            reference: reference.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            report_best: false,
            score_params: ScoreParams::default(),
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Result<Self> {
        let output = output.into();
        if output.as_os_str().is_empty() {
            return Err(AlignerError::InvalidParameter(
                "output path cannot be empty".to_string(),
            ));
        }
        self.output = output;
        Ok(self)
    }

    pub fn with_report_best(mut self, report_best: bool) -> Self {
        self.report_best = report_best;
        self
    }

    pub fn with_score_params(mut self, params: ScoreParams) -> Self {
        self.score_params = params;
        self
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn reference(&self) -> &Path {
        &self.reference
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn report_best(&self) -> bool {
        self.report_best
    }

    pub fn score_params(&self) -> &ScoreParams {
        &self.score_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::new("a.txt", "b.txt");
        assert_eq!(config.primary(), Path::new("a.txt"));
        assert_eq!(config.reference(), Path::new("b.txt"));
        assert_eq!(config.output(), Path::new("test.txt"));
        assert!(!config.report_best());
        assert_eq!(*config.score_params(), ScoreParams::default());
    }

    #[test]
    fn empty_output_rejected() {
        assert!(RunConfig::new("a", "b").with_output("").is_err());
    }
}
