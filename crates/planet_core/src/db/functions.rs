//! SQL scalar functions registered on every opened connection.
//!
//! # Invariants
//! - `unicode_lower(x)` equals Rust `str::to_lowercase`, so SQL filters and
//!   in-memory filters fold case identically.
//! - `unicode_lower(NULL)` is `NULL`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// SQL name of the Unicode-aware lowercase function.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Case folding shared by SQL and in-memory matching.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.as_deref().map(fold_case))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{register_functions, UNICODE_LOWER};
    use rusqlite::Connection;

    #[test]
    fn unicode_lower_folds_non_ascii_letters() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let folded: String = conn
            .query_row(&format!("SELECT {UNICODE_LOWER}('ÁRIDO Ærø')"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(folded, "árido ærø");

        let null: Option<String> = conn
            .query_row(&format!("SELECT {UNICODE_LOWER}(NULL)"), [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }
}
