// InterPro to GO Mapping Parser
//
// Parses the interpro2go file.
//
// File Format:
//   !date: 2022/10/05 11:07:08
//   !Mapping of InterPro entries to GO
//   InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:DNA binding ; GO:0003677
//
// Lines starting with '!' are metadata. There is no recovery for any other
// line that does not have this shape.

use super::{GoId, GoIndex, InterProError, InterProId, Result};
use crate::fetch::{Fetcher, SourceFile};
use std::io::{BufRead, BufReader};
use tracing::info;

const GO_FILE: &str = "interpro2go";
const INTERPRO_PREFIX: &str = "InterPro:";

/// Parse the release interpro2go file into entry -> GO terms
pub fn load_go_index<F: Fetcher + ?Sized>(fetcher: &F, force: bool) -> Result<GoIndex> {
    let path = fetcher.ensure(SourceFile::InterPro2Go, force)?;
    let index = parse_interpro2go(BufReader::new(std::fs::File::open(&path)?))?;

    info!(
        entries = index.len(),
        mappings = index.values().map(|terms| terms.len()).sum::<usize>(),
        "Loaded InterPro to GO mappings"
    );
    Ok(index)
}

pub fn parse_interpro2go<R: BufRead>(reader: R) -> Result<GoIndex> {
    let mut index = GoIndex::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        let (interpro_id, go_id) = parse_go_line(line)
            .map_err(|message| InterProError::parse(GO_FILE, number + 1, message))?;
        index.entry(interpro_id).or_default().insert(go_id);
    }

    Ok(index)
}

/// Split one mapping line into (InterPro id, GO id)
pub fn parse_go_line(line: &str) -> std::result::Result<(InterProId, GoId), &'static str> {
    let rest = line
        .trim()
        .strip_prefix(INTERPRO_PREFIX)
        .ok_or("missing 'InterPro:' prefix")?;

    let (rest, go_id) = rest.rsplit_once(';').ok_or("missing ';' before the GO id")?;
    let go_id = go_id.trim();
    if go_id.is_empty() {
        return Err("empty GO id");
    }

    let (rest, _go_name) = rest
        .trim()
        .rsplit_once('>')
        .ok_or("missing '>' before the GO term name")?;

    let (interpro_id, _interpro_name) = rest
        .trim()
        .split_once(' ')
        .ok_or("missing entry name after the InterPro id")?;

    Ok((interpro_id.trim().to_string(), go_id.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_line() {
        let (ipr, go) =
            parse_go_line("InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:DNA binding ; GO:0003677")
                .unwrap();
        assert_eq!(ipr, "IPR000003");
        assert_eq!(go, "GO:0003677");
    }

    #[test]
    fn test_parse_go_line_with_separators_in_names() {
        // '>' and ';' inside names must not confuse the right-hand splits
        let (ipr, go) = parse_go_line(
            "InterPro:IPR000010 Cystatin domain > GO:cysteine-type endopeptidase inhibitor activity ; GO:0004869",
        )
        .unwrap();
        assert_eq!((ipr.as_str(), go.as_str()), ("IPR000010", "GO:0004869"));

        let (ipr, _) = parse_go_line("InterPro:IPR999999 A > B domain > GO:x ; GO:0000001").unwrap();
        assert_eq!(ipr, "IPR999999");
    }

    #[test]
    fn test_parse_go_line_errors() {
        assert!(parse_go_line("IPR000003 Retinoid > GO:DNA binding ; GO:0003677").is_err());
        assert!(parse_go_line("InterPro:IPR000003 Retinoid > GO:DNA binding GO:0003677").is_err());
        assert!(parse_go_line("InterPro:IPR000003 Retinoid GO:DNA binding ; GO:0003677").is_err());
        assert!(parse_go_line("InterPro:IPR000003 > GO:DNA binding ; GO:0003677").is_err());
        assert!(parse_go_line("InterPro:IPR000003 Retinoid > GO:DNA binding ; ").is_err());
    }

    #[test]
    fn test_parse_file_skips_comments_and_collects_sets() {
        let input = "!date: 2022/10/05 11:07:08\n\
                     !Mapping of InterPro entries to GO\n\
                     InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:DNA binding ; GO:0003677\n\
                     InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:nuclear steroid receptor activity ; GO:0003707\n\
                     InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:DNA binding ; GO:0003677\n\
                     \n\
                     InterPro:IPR000006 Metallothionein, vertebrate > GO:metal ion binding ; GO:0046872\n";
        let index = parse_interpro2go(input.as_bytes()).unwrap();

        assert_eq!(index.len(), 2);
        let terms: Vec<&str> = index["IPR000003"].iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["GO:0003677", "GO:0003707"]);
        assert!(index["IPR000006"].contains("GO:0046872"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "!header\nInterPro:IPR000003 Retinoid > GO:x ; GO:0003677\nInterPro:IPR000004 broken\n";
        let err = parse_interpro2go(input.as_bytes()).unwrap_err();
        assert!(matches!(err, InterProError::Parse { file: "interpro2go", line: 3, .. }));
    }
}
