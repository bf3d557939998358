#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodecError {
    /// The buffer is shorter than the fixed width of the layout it was decoded against.
    MalformedRecord { expected: usize, actual: usize },
    /// A field declared by the instruction layout wasn't supplied.
    MissingField(&'static str),
    /// A supplied field value doesn't match the kind declared by the layout.
    FieldKindMismatch(&'static str),
    /// The decoded tag isn't the one the caller asked for.
    TagMismatch { expected: u64, actual: u64 },
    /// The byte doesn't correspond to a known instruction.
    InvalidInstructionTag(u8),
    /// The tag value doesn't fit in the layout's tag width.
    TagOverflow { width: usize, tag: u64 },
}

impl From<&CodecError> for &'static str {
    fn from(value: &CodecError) -> Self {
        match value {
            CodecError::MalformedRecord { .. } => "Malformed record",
            CodecError::MissingField(_) => "Missing instruction field",
            CodecError::FieldKindMismatch(_) => "Mismatched field kind",
            CodecError::TagMismatch { .. } => "Account tag mismatch",
            CodecError::InvalidInstructionTag(_) => "Invalid instruction tag",
            CodecError::TagOverflow { .. } => "Tag overflow",
        }
    }
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let description: &'static str = self.into();
        match self {
            CodecError::MalformedRecord { expected, actual } => {
                write!(f, "{description}: expected {expected} bytes, got {actual}")
            }
            CodecError::MissingField(name) | CodecError::FieldKindMismatch(name) => {
                write!(f, "{description}: `{name}`")
            }
            CodecError::TagMismatch { expected, actual } => {
                write!(f, "{description}: expected {expected}, got {actual}")
            }
            CodecError::InvalidInstructionTag(tag) => write!(f, "{description}: {tag}"),
            CodecError::TagOverflow { width, tag } => {
                write!(f, "{description}: {tag} doesn't fit in {width} byte(s)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

pub type CodecResult<T = ()> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::CodecError;

    #[test]
    fn display_includes_details() {
        assert_eq!(
            CodecError::MalformedRecord {
                expected: 98,
                actual: 97
            }
            .to_string(),
            "Malformed record: expected 98 bytes, got 97"
        );
        assert_eq!(
            CodecError::MissingField("nonce").to_string(),
            "Missing instruction field: `nonce`"
        );
        assert_eq!(
            CodecError::TagOverflow { width: 1, tag: 300 }.to_string(),
            "Tag overflow: 300 doesn't fit in 1 byte(s)"
        );
    }
}
