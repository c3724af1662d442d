//! User gestures replayed by the CLI

use std::fmt;
use std::str::FromStr;

/// One user interaction with the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Click on a column header.
    Sort(String),
    /// Type into the search box.
    Search(String),
    /// Drag a row; `to` is `None` when dropped outside the list (`move:<from>:-`).
    Move { from: usize, to: Option<usize> },
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("gesture '{s}' must look like kind:argument"))?;

        match kind {
            "sort" if !rest.is_empty() => Ok(Gesture::Sort(rest.to_string())),
            "sort" => Err("sort needs a column key".to_string()),
            "search" => Ok(Gesture::Search(rest.to_string())),
            "move" => {
                let (from, to) = rest
                    .split_once(':')
                    .ok_or_else(|| format!("move '{rest}' must look like <from>:<to>"))?;
                let from = from
                    .parse()
                    .map_err(|_| format!("invalid move source '{from}'"))?;
                let to = match to {
                    "-" => None,
                    index => Some(
                        index
                            .parse()
                            .map_err(|_| format!("invalid move target '{index}'"))?,
                    ),
                };
                Ok(Gesture::Move { from, to })
            }
            other => Err(format!("unknown gesture '{other}'")),
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Sort(column) => write!(f, "sort by {column}"),
            Gesture::Search(text) => write!(f, "search {text:?}"),
            Gesture::Move { from, to: Some(to) } => write!(f, "move {from} -> {to}"),
            Gesture::Move { from, to: None } => write!(f, "move {from} -> (outside)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gestures() {
        assert_eq!("sort:name".parse::<Gesture>(), Ok(Gesture::Sort("name".to_string())));
        assert_eq!("search:".parse::<Gesture>(), Ok(Gesture::Search(String::new())));
        assert_eq!("search:a:b".parse::<Gesture>(), Ok(Gesture::Search("a:b".to_string())));
        assert_eq!("move:3:0".parse::<Gesture>(), Ok(Gesture::Move { from: 3, to: Some(0) }));
        assert_eq!("move:3:-".parse::<Gesture>(), Ok(Gesture::Move { from: 3, to: None }));
    }

    #[test]
    fn test_reject_malformed() {
        for raw in ["sort", "sort:", "move:1", "move:x:1", "move:1:y", "jump:1"] {
            assert!(raw.parse::<Gesture>().is_err(), "{raw} should be rejected");
        }
    }
}
