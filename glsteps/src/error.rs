use std::fmt;

use crate::shader::StageKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not initialize the window context: {0}")]
    ContextInit(String),

    #[error("could not initialize the gl driver: {0}")]
    DriverInit(String),

    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: StageKind, log: String },

    #[error("failed to link program:\n{log}")]
    Link { log: String },

    #[error("program failed validation:\n{log}")]
    Validation { log: String },

    #[error("{what}: {}", GlCodes(.codes))]
    Gl { what: String, codes: Vec<u32> },

    #[error("texture: {0}")]
    Texture(String),

    #[error("could not create {0}")]
    Resource(String),
}

impl Error {
    /// Whether the frame loop may still start after this error.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

struct GlCodes<'a>(&'a [u32]);

impl fmt::Display for GlCodes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "error 0x{code:04x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_error_lists_every_code() {
        let err = Error::Gl {
            what: "display".into(),
            codes: vec![0x0500, 0x0502],
        };
        assert_eq!(err.to_string(), "display: error 0x0500, error 0x0502");
    }

    #[test]
    fn compile_error_names_stage_and_keeps_log() {
        let err = Error::Compile {
            stage: StageKind::Fragment,
            log: "0:3: error: syntax error".into(),
        };
        let text = err.to_string();
        assert!(text.starts_with("failed to compile fragment shader"));
        assert!(text.ends_with("0:3: error: syntax error"));
    }

    #[test]
    fn only_validation_is_advisory() {
        assert!(Error::Validation { log: String::new() }.is_advisory());
        assert!(!Error::Link { log: String::new() }.is_advisory());
        assert!(!Error::ContextInit("no display".into()).is_advisory());
    }
}
