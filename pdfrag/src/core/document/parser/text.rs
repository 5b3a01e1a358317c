use crate::error::PdfragError;

/// Reads plain text and markdown files. Invalid UTF-8 is replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl TextParser {
    pub fn parse(&self, input: &[u8]) -> Result<String, PdfragError> {
        Ok(String::from_utf8_lossy(input).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lossy() {
        let out = TextParser.parse(b"Inflation \xF0\x28 rate").unwrap();
        assert!(out.starts_with("Inflation "));
        assert!(out.ends_with(" rate"));
    }
}
