//! Escape handling for LIKE patterns on backends whose default escape
//! character is the backslash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SqlAstTranslator;
use crate::ast::{Expr, Literal};
use crate::error::Result;

/// What to do with a LIKE predicate that has no explicit escape character
/// on a backend that treats the backslash as the default escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeEscapePolicy {
    /// Double every backslash in the pattern so it matches literally.
    #[default]
    ReescapeBackslash,
    /// Emit the pattern as is, without any escape clause.
    OmitEscapeClause,
}

impl LikeEscapePolicy {
    /// Returns the setting value naming the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReescapeBackslash => "reescape_backslash",
            Self::OmitEscapeClause => "omit_escape_clause",
        }
    }
}

impl fmt::Display for LikeEscapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LikeEscapePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reescape_backslash" => Ok(Self::ReescapeBackslash),
            "omit_escape_clause" => Ok(Self::OmitEscapeClause),
            other => Err(format!("unknown like escape policy '{other}'")),
        }
    }
}

/// Renders `pattern` so that backslashes match literally.
///
/// String literals are rewritten with doubled backslashes; any other
/// expression is wrapped in `replace(<pattern>,'\','\\')`.
///
/// # Errors
///
/// Returns an error when the pattern expression cannot be rendered.
pub fn render_backslash_escaped_pattern<T: SqlAstTranslator + ?Sized>(
    translator: &mut T,
    pattern: &Expr,
) -> Result<()> {
    match pattern {
        Expr::Literal(Literal::String(value)) => {
            let literal = translator
                .dialect()
                .quote_string(&value.replace('\\', "\\\\"));
            translator.append_sql(&literal);
            Ok(())
        }
        Expr::Literal(Literal::Null) => translator.visit_expr(pattern),
        _ => {
            translator.append_sql("replace(");
            translator.visit_expr(pattern)?;
            translator.append_sql(",'\\','\\\\')");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names() {
        assert_eq!(
            "omit_escape_clause".parse(),
            Ok(LikeEscapePolicy::OmitEscapeClause)
        );
        assert_eq!(
            " Reescape_Backslash ".parse(),
            Ok(LikeEscapePolicy::ReescapeBackslash)
        );
        assert!("both".parse::<LikeEscapePolicy>().is_err());
        assert_eq!(LikeEscapePolicy::default().to_string(), "reescape_backslash");
    }

    #[test]
    fn test_policy_serde() {
        let policy: LikeEscapePolicy = serde_json::from_str("\"omit_escape_clause\"").unwrap();
        assert_eq!(policy, LikeEscapePolicy::OmitEscapeClause);
        assert_eq!(
            serde_json::to_string(&LikeEscapePolicy::ReescapeBackslash).unwrap(),
            "\"reescape_backslash\""
        );
    }
}
