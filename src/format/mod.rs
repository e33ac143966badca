//! Code formatting for generated output
//!
//! - Rust goes through `syn` + prettyplease, which also rejects output that
//!   does not parse
//! - Swift gets whitespace cleanup only

/// Format Rust code using prettyplease
pub fn format_rust(code: &str) -> Result<String, FormatError> {
    match syn::parse_file(code) {
        Ok(syntax_tree) => Ok(prettyplease::unparse(&syntax_tree)),
        Err(e) => Err(FormatError::ParseError {
            language: "Rust".to_string(),
            message: e.to_string(),
        }),
    }
}

/// Strip trailing whitespace, collapse blank-line runs, end with one newline
pub fn format_swift(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut blank_run = 0;
    for line in code.trim_matches('\n').lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Formatting errors
#[derive(Debug, Clone)]
pub enum FormatError {
    /// Failed to parse the code
    ParseError { language: String, message: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::ParseError { language, message } => {
                write!(f, "Failed to parse generated {} code: {}", language, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for crate::error::Error {
    fn from(e: FormatError) -> Self {
        crate::error::Error::Render(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rust_simple() {
        let code = "pub struct AB{pub a:i32}impl Default for AB{fn default()->Self{Self{a:0}}}";
        let result = format_rust(code).unwrap();

        assert!(result.contains("pub struct AB {\n    pub a: i32,\n}"));
        assert!(result.contains("impl Default for AB {"));
    }

    #[test]
    fn test_format_rust_invalid() {
        let result = format_rust("pub enum { }");

        match result {
            Err(FormatError::ParseError { language, .. }) => {
                assert_eq!(language, "Rust");
            }
            _ => panic!("Expected ParseError"),
        }
    }

    #[test]
    fn test_format_swift() {
        let code = "\n\nstruct A {   \n    var a: Int = 0\n\n\n\n    func build() {}\n}";
        assert_eq!(
            format_swift(code),
            "struct A {\n    var a: Int = 0\n\n    func build() {}\n}\n"
        );
        assert_eq!(format_swift(""), "");
    }
}
