use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User input naming a single record.
///
/// - a UUID selects by id,
/// - a bare number selects by 1-based position in the collection's listing,
/// - anything else is a contact name (matched case-insensitively).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(Uuid),
    Index(usize),
    Name(String),
}

impl Selector {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(id) = Uuid::parse_str(input) {
            return Selector::Id(id);
        }
        if let Ok(n) = input.parse::<usize>() {
            return Selector::Index(n);
        }
        Selector::Name(input.to_string())
    }

    /// Builds a selector from command-line words. Several words are always a
    /// name, so `Anna Kovalenko` needs no quoting.
    pub fn from_words<I: AsRef<str>>(words: &[I]) -> Self {
        match words {
            [single] => Selector::parse(single.as_ref()),
            _ => Selector::Name(
                words
                    .iter()
                    .map(|w| w.as_ref())
                    .collect::<Vec<&str>>()
                    .join(" "),
            ),
        }
    }

    /// Builds one selector per word, except that a run made only of names
    /// is joined into a single name: `delete 2 5` is two contacts,
    /// `delete Anna Kovalenko` is one.
    pub fn list_from_words<I: AsRef<str>>(words: &[I]) -> Vec<Self> {
        let parsed: Vec<Selector> = words.iter().map(|w| Selector::parse(w.as_ref())).collect();
        if parsed.len() > 1 && parsed.iter().all(|s| matches!(s, Selector::Name(_))) {
            vec![Selector::from_words(words)]
        } else {
            parsed
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selector::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "{}", id),
            Selector::Index(n) => write!(f, "#{}", n),
            Selector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_indexes_and_names() {
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<Selector>().unwrap(),
            Selector::Id(id)
        );
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            " Anna ".parse::<Selector>().unwrap(),
            Selector::Name("Anna".into())
        );
    }

    #[test]
    fn joins_multiple_words_into_a_name() {
        assert_eq!(
            Selector::from_words(&["Anna", "Kovalenko"]),
            Selector::Name("Anna Kovalenko".into())
        );
        assert_eq!(Selector::from_words(&["2"]), Selector::Index(2));
    }

    #[test]
    fn lists_split_unless_all_names() {
        assert_eq!(
            Selector::list_from_words(&["2", "5"]),
            vec![Selector::Index(2), Selector::Index(5)]
        );
        assert_eq!(
            Selector::list_from_words(&["Anna", "Kovalenko"]),
            vec![Selector::Name("Anna Kovalenko".into())]
        );
        assert!(Selector::list_from_words::<&str>(&[]).is_empty());
    }
}
