use crate::data::ColumnMapping;
use crate::host::Host;

/// Point each admin dropdown at its expected header.
///
/// Dropdowns missing from the page are skipped. Returns how many dropdowns
/// ended up showing their header; one that lacks the header as an option is
/// left unselected and not counted.
pub fn apply_column_mapping(host: &mut dyn Host, mappings: &[ColumnMapping]) -> usize {
    let mut applied = 0;
    for mapping in mappings {
        if !host.has_element(&mapping.select) {
            tracing::debug!(select = %mapping.select, "No such dropdown, skipping");
            continue;
        }
        if let Err(e) = host.set_value(&mapping.select, &mapping.header) {
            tracing::warn!("Could not map {}: {}", mapping.select, e);
            continue;
        }
        match host.value(&mapping.select) {
            Ok(value) if value == mapping.header => applied += 1,
            Ok(_) => tracing::warn!(select = %mapping.select, header = %mapping.header, "Header is not an option"),
            Err(e) => tracing::warn!("Could not read back {}: {}", mapping.select, e),
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Choice;
    use crate::host::Document;

    fn mapping(select: &str, header: &str) -> ColumnMapping {
        ColumnMapping { select: select.to_string(), header: header.to_string() }
    }

    #[test]
    fn test_sets_each_dropdown() {
        let headers: Vec<Choice> = ["TeamNumber", "TeamName", "Organization"]
            .iter()
            .map(|h| Choice::new(*h, *h))
            .collect();
        let mut doc = Document::new("Columns")
            .select("teamNumber", "Team number")
            .select("teamName", "Team name")
            .text("note", "Note");
        doc.set_options("teamNumber", &headers).unwrap();
        doc.set_options("teamName", &headers).unwrap();

        let applied = apply_column_mapping(
            &mut doc,
            &[
                mapping("teamNumber", "TeamNumber"),
                mapping("teamName", "TeamName"),
                mapping("division", "Division"),
                mapping("note", "Organization"),
            ],
        );

        assert_eq!(applied, 2);
        assert_eq!(doc.value("teamNumber").unwrap(), "TeamNumber");
        assert_eq!(doc.value("teamName").unwrap(), "TeamName");
    }

    #[test]
    fn test_header_without_option_is_not_counted() {
        let mut doc = Document::new("Columns").select("division", "Division");
        doc.set_options("division", &[Choice::new("TeamName", "TeamName")]).unwrap();

        let applied = apply_column_mapping(&mut doc, &[mapping("division", "Division")]);

        assert_eq!(applied, 0);
        assert_eq!(doc.value("division").unwrap(), "");
    }
}
