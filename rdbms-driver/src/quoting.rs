/// Which letters a dialect accepts in an unquoted identifier without changing its meaning.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IdentifierCase {
    /// Unquoted identifiers keep their case, so both cases are safe.
    Preserved,
    /// Unquoted identifiers are folded to upper case, so only upper case is safe.
    FoldedToUpper,
}

/// Provides utilities for quoting identifiers in one SQL dialect as needed.
///
/// Quoters are plain data and can be built in a `const` context, so every dialect
/// keeps exactly one of them in a static.
#[derive(Debug)]
pub struct IdentifierQuoter {
    open: char,
    close: char,
    case: IdentifierCase,
    /// Characters besides letters that may start an unquoted identifier.
    leading_extra: &'static str,
    /// Characters besides letters, digits and `_` that may appear in an unquoted identifier.
    trailing_extra: &'static str,
    /// Reserved words, upper case. These are always quoted.
    keywords: &'static [&'static str],
}

impl IdentifierQuoter {
    pub const fn new(
        open: char,
        close: char,
        case: IdentifierCase,
        leading_extra: &'static str,
        trailing_extra: &'static str,
        keywords: &'static [&'static str],
    ) -> Self {
        Self {
            open,
            close,
            case,
            leading_extra,
            trailing_extra,
            keywords,
        }
    }

    /// Creates a quoter that uses ANSI double quotes and knows no keywords.
    ///
    /// This is mainly useful for testing.
    pub const fn empty() -> Self {
        Self::new('"', '"', IdentifierCase::Preserved, "_", "", &[])
    }

    /// Returns true if the identifier can be written without quotes.
    pub fn is_safe(&self, identifier: &str) -> bool {
        let mut chars = identifier.chars();

        let Some(first) = chars.next() else {
            return false;
        };

        if !(self.is_letter(first) || self.leading_extra.contains(first)) {
            return false;
        }

        let body_safe = chars.all(|c| {
            self.is_letter(c) || c.is_ascii_digit() || c == '_' || self.trailing_extra.contains(c)
        });

        body_safe
            && !self
                .keywords
                .iter()
                .any(|k| k.eq_ignore_ascii_case(identifier))
    }

    fn is_letter(&self, c: char) -> bool {
        match self.case {
            IdentifierCase::Preserved => c.is_ascii_alphabetic(),
            IdentifierCase::FoldedToUpper => c.is_ascii_uppercase(),
        }
    }

    /// Quotes an identifier as needed.
    pub fn quote(&self, identifier: impl AsRef<str>) -> String {
        let identifier = identifier.as_ref();

        if self.is_safe(identifier) {
            identifier.to_string()
        } else {
            self.quote_always(identifier)
        }
    }

    /// Wraps the identifier in the dialect's quote characters, doubling any embedded closing quote.
    pub fn quote_always(&self, identifier: impl AsRef<str>) -> String {
        let identifier = identifier.as_ref();
        let mut doubled = String::with_capacity(2);
        doubled.push(self.close);
        doubled.push(self.close);
        let escaped = identifier.replace(self.close, &doubled);

        format!("{}{}{}", self.open, escaped, self.close)
    }

    /// Quotes multiple identifiers as needed.
    pub fn quote_iter<'a, S: AsRef<str>, I: IntoIterator<Item = S>>(
        &'a self,
        identifiers: I,
    ) -> impl Iterator<Item = String> + 'a
    where
        <I as IntoIterator>::IntoIter: 'a,
    {
        identifiers.into_iter().map(move |i| self.quote(i))
    }
}

/// A trait for types that can be quoted.
pub(crate) trait Quotable {
    /// Quotes the value as needed.
    fn quote(&self, quoter: &IdentifierQuoter) -> String;
}

impl<S> Quotable for S
where
    S: AsRef<str>,
{
    fn quote(&self, quoter: &IdentifierQuoter) -> String {
        quoter.quote(self)
    }
}

/// Quotes a string value for usage as a SQL literal.
pub(crate) fn quote_value_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
