//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dsf_model::{
    DiseaseCustomKeyword, DiseaseRecord, ExtractedOrganization, HierarchyStats, NandoHierarchy,
    Organization, VerificationStatus,
};
use dsf_workspace::{ChangeQueue, Notice, NoticeKind, TablePage, Workspace};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) if !value.is_empty() => Cell::new(value),
        _ => dim_cell("-"),
    }
}

fn searchable_cell(is_searchable: bool) -> Cell {
    if is_searchable {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Plain disease listing.
pub fn disease_table(records: &[DiseaseRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("NANDO ID"),
        header_cell("English name"),
        header_cell("Searchable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.name),
            optional_cell(record.nando_id.as_deref()),
            optional_cell(record.name_en.as_deref()),
            searchable_cell(record.is_searchable),
        ]);
    }
    table
}

/// The visible workspace page. Rows whose flag differs from the server are marked `*`.
pub fn workspace_table(workspace: &Workspace, page: &TablePage<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("NANDO ID"),
        header_cell("English name"),
        header_cell("Searchable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Center);
    for record in &page.rows {
        let marker = if workspace.is_modified(&record.id) {
            Cell::new("*").fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker,
            Cell::new(&record.id),
            Cell::new(&record.name),
            optional_cell(record.nando_id.as_deref()),
            optional_cell(record.name_en.as_deref()),
            searchable_cell(record.is_searchable),
        ]);
    }
    table
}

/// One-line summary under the workspace table.
pub fn status_line(workspace: &Workspace, page: &TablePage<'_>) -> String {
    let mut line = format!(
        "Page {}/{} | {} | {} per page | {} pending | {}",
        page.page + 1,
        page.total_pages,
        page.range_label(),
        workspace.view().rows_per_page(),
        workspace.pending_count(),
        workspace.phase().label()
    );
    let filter = workspace.view().filter();
    if !filter.is_empty() {
        line.push_str(&format!(" | filter: {filter}"));
    }
    line
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("ok: {}", notice.message),
        NoticeKind::Error => format!("error: {}", notice.message),
    }
}

/// Pending changes in queue order, with the disease name when it is loaded.
pub fn pending_table(queue: &ChangeQueue, workspace: &Workspace) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Searchable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (index, change) in queue.iter().enumerate() {
        let name = workspace
            .disease(&change.disease_id)
            .map(|record| record.name.as_str());
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&change.disease_id),
            optional_cell(name),
            searchable_cell(change.is_searchable),
        ]);
    }
    table
}

pub fn keyword_table(keywords: &[DiseaseCustomKeyword]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Keyword"),
        header_cell("Type"),
        header_cell("Added by"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for keyword in keywords {
        table.add_row(vec![
            Cell::new(keyword.id),
            Cell::new(&keyword.keyword),
            optional_cell(keyword.keyword_type.as_deref()),
            optional_cell(keyword.added_by.as_deref()),
        ]);
    }
    table
}

pub fn stats_table(stats: &HierarchyStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total diseases"), Cell::new(stats.total_diseases)]);
    table.add_row(vec![
        Cell::new("Searchable diseases"),
        Cell::new(stats.searchable_diseases),
    ]);
    table.add_row(vec![
        Cell::new("Reduction rate"),
        optional_cell(stats.reduction_rate.as_deref()),
    ]);
    table.add_row(vec![Cell::new("Subtypes"), Cell::new(stats.subtypes_count)]);
    table.add_row(vec![
        Cell::new("Subtype patterns"),
        Cell::new(stats.subtypes_patterns),
    ]);
    table.add_row(vec![
        Cell::new("Excluded categories"),
        if stats.excluded_categories.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(stats.excluded_categories.join(", "))
        },
    ]);
    table
}

/// Child diseases grouped by parent. `parent` restricts output to one group.
pub fn hierarchy_table(hierarchy: &NandoHierarchy, parent: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parent"),
        header_cell("NANDO ID"),
        header_cell("Name"),
        header_cell("Searchable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    let groups = hierarchy
        .iter()
        .filter(|(key, _)| parent.is_none_or(|wanted| key.as_str() == wanted));
    for (key, children) in groups {
        for (index, child) in children.iter().enumerate() {
            let parent_cell = if index == 0 {
                Cell::new(key).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                parent_cell,
                optional_cell(child.nando_id.as_deref()),
                Cell::new(&child.name),
                searchable_cell(child.is_searchable),
            ]);
        }
    }
    table
}

pub fn organization_table(organizations: &[Organization]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("URL"),
        header_cell("Status"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for organization in organizations {
        let status = match organization.verification_status {
            VerificationStatus::Verified => Cell::new("verified").fg(Color::Green),
            VerificationStatus::Rejected => Cell::new("rejected").fg(Color::Red),
            VerificationStatus::Pending => Cell::new("pending").fg(Color::Yellow),
        };
        let score = match organization.relevance_score {
            Some(score) => Cell::new(format!("{score:.1}")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&organization.id),
            Cell::new(&organization.name),
            optional_cell(organization.organization_type.map(|t| t.label())),
            optional_cell(organization.url.as_deref()),
            status,
            score,
        ]);
    }
    table
}

/// Organizations returned by a test extraction.
pub fn extraction_table(organizations: &[ExtractedOrganization]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Type"),
        header_cell("URL"),
        header_cell("Contact"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for organization in organizations {
        let name = if organization.name.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&organization.name)
        };
        table.add_row(vec![
            name,
            optional_cell(organization.organization_type.map(|t| t.label())),
            optional_cell(organization.url.as_deref()),
            optional_cell(organization.contact.as_deref()),
            optional_cell(organization.description.as_deref()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_table_shows_missing_values_as_dash() {
        let table = disease_table(&[DiseaseRecord::new("d1", "Fabry")]);
        let rendered = table.to_string();
        assert!(rendered.contains("Fabry"));
        assert!(rendered.contains('-'));
        assert!(rendered.contains("no"));
    }

    #[test]
    fn test_extraction_table_lists_candidates() {
        let organizations = vec![ExtractedOrganization {
            name: "日本ALS協会".to_string(),
            url: Some("https://alsjapan.org".to_string()),
            ..ExtractedOrganization::default()
        }];
        let rendered = extraction_table(&organizations).to_string();
        assert!(rendered.contains("日本ALS協会"));
        assert!(rendered.contains("https://alsjapan.org"));
    }

    #[test]
    fn test_notice_line() {
        assert_eq!(notice_line(&Notice::success("Saved")), "ok: Saved");
        assert_eq!(notice_line(&Notice::error("Boom")), "error: Boom");
    }
}
