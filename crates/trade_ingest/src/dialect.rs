/// Delimiter and quote convention of a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
}

impl Default for Dialect {
    /// Comma-delimited with standard double quoting, the convention
    /// most broker exports use.
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Delimiters worth considering, in preference order for ties.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How many non-empty lines to sample when inferring the delimiter.
const SAMPLE_LINES: usize = 10;

/// Infers the delimiter convention of `data` by sampling its first lines.
///
/// A candidate delimiter qualifies when it appears outside quoted
/// sections the same number of times on every sampled line; among
/// qualifying candidates the most frequent wins. Detection never fails:
/// when no candidate qualifies the default comma dialect is returned.
pub fn detect_dialect(data: &str) -> Dialect {
    let sample: Vec<&str> = data
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if sample.is_empty() {
        return Dialect::default();
    }

    let mut best: Option<(u8, usize)> = None;
    for &delim in CANDIDATE_DELIMITERS.iter() {
        let first = unquoted_count(sample[0], delim);
        if first == 0 {
            continue;
        }
        let consistent = sample
            .iter()
            .all(|line| unquoted_count(line, delim) == first);
        if consistent && best.map_or(true, |(_, count)| first > count) {
            best = Some((delim, first));
        }
    }

    match best {
        Some((delimiter, _)) => Dialect {
            delimiter,
            quote: b'"',
        },
        None => Dialect::default(),
    }
}

/// Counts occurrences of `delim` on one line, ignoring quoted sections.
fn unquoted_count(line: &str, delim: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delim && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_comma() {
        let data = "Date,Action,Amount\n01/31/2025,Buy,2\n02/01/2025,Sell,1\n";
        assert_eq!(detect_dialect(data).delimiter, b',');
    }

    #[test]
    fn test_detects_semicolon() {
        let data = "Date;Action;Amount\n01/31/2025;Buy;2\n02/01/2025;Sell;1\n";
        assert_eq!(detect_dialect(data).delimiter, b';');
    }

    #[test]
    fn test_detects_tab() {
        let data = "Date\tAction\n01/31/2025\tBuy\n";
        assert_eq!(detect_dialect(data).delimiter, b'\t');
    }

    #[test]
    fn test_quoted_delimiters_are_ignored() {
        // The comma inside the quoted instrument name must not be counted.
        let data = "Instrument,NetPl\n\"Micro E-mini, Mar 25\",10.00\n\"Gold, Jun 25\",-3.50\n";
        assert_eq!(detect_dialect(data).delimiter, b',');
    }

    #[test]
    fn test_falls_back_to_comma_on_garbage() {
        assert_eq!(detect_dialect("no delimiters here\njust words\n"), Dialect::default());
        assert_eq!(detect_dialect(""), Dialect::default());
    }

    #[test]
    fn test_inconsistent_candidate_is_rejected() {
        // Semicolon count varies per line, comma is consistent.
        let data = "a,b;x\nc,d;;y\ne,f;z\n";
        assert_eq!(detect_dialect(data).delimiter, b',');
    }
}
