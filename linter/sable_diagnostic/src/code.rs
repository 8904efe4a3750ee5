use std::fmt;

/// Lint codes for all diagnostics this linter emits.
///
/// Format: L#### where the first digit indicates the rule family:
/// - L1xxx: indentation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LintCode {
    /// Line indented with the wrong number of indentation units.
    L1001,
    /// Correct width, but one or more indentation characters are of the
    /// wrong kind (tab where spaces are configured, or the reverse).
    L1002,
}

impl LintCode {
    /// The code as written in output, e.g. `"L1001"`.
    pub fn as_str(self) -> &'static str {
        match self {
            LintCode::L1001 => "L1001",
            LintCode::L1002 => "L1002",
        }
    }

    /// One-line description of the lint.
    pub fn description(self) -> &'static str {
        match self {
            LintCode::L1001 => "wrong indentation width",
            LintCode::L1002 => "wrong indentation character",
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strings() {
        assert_eq!(LintCode::L1001.as_str(), "L1001");
        assert_eq!(format!("{}", LintCode::L1002), "L1002");
    }

    #[test]
    fn descriptions_are_distinct() {
        assert_ne!(
            LintCode::L1001.description(),
            LintCode::L1002.description()
        );
    }
}
