//! SQL text output.
//!
//! Rendering is purely structural: every AST node implements
//! `std::fmt::Display`, and `write!` placeholders inline the SQL form of
//! child nodes. The helpers here keep separator discipline (commas, spaces)
//! in one place so list rendering stays uniform across node families.

use std::fmt;

/// Render any AST node (or fragment) to its canonical SQL text.
pub fn render<T: fmt::Display + ?Sized>(node: &T) -> String {
    node.to_string()
}

/// Lazily formatted slice with a separator between items.
pub struct DisplaySeparated<'a, T>
where
    T: fmt::Display,
{
    slice: &'a [T],
    sep: &'static str,
}

impl<T> fmt::Display for DisplaySeparated<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in self.slice {
            if !first {
                f.write_str(self.sep)?;
            }
            first = false;
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Join `slice` with an arbitrary separator.
pub fn display_separated<'a, T>(slice: &'a [T], sep: &'static str) -> DisplaySeparated<'a, T>
where
    T: fmt::Display,
{
    DisplaySeparated { slice, sep }
}

/// Join `slice` with `", "`, the canonical list separator.
pub fn display_comma_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T>
where
    T: fmt::Display,
{
    DisplaySeparated { slice, sep: ", " }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_comma_separated() {
        assert_eq!(display_comma_separated(&["a", "b", "c"]).to_string(), "a, b, c");
        assert_eq!(display_comma_separated::<&str>(&[]).to_string(), "");
    }

    #[test]
    fn test_display_separated() {
        assert_eq!(display_separated(&[1, 2, 3], " AND ").to_string(), "1 AND 2 AND 3");
        assert_eq!(display_separated(&[7], ".").to_string(), "7");
    }
}
