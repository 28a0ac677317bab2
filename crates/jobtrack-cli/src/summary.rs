use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use jobtrack_cli::commands::{DetectOutcome, ImportOutcome, MappingsOutcome, PreviewOutcome};
use jobtrack_import::{CommitSummary, ImportReport, SourceKind};
use jobtrack_model::{ApplicationField, FieldMapping, ImportPreview, MappingTarget};

pub fn print_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in ApplicationField::ALL {
        table.add_row(vec![
            Cell::new(field.key()).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(field.label()),
            required_cell(field.is_required()),
        ]);
    }
    println!("{table}");
}

pub fn print_detect(outcome: &DetectOutcome) {
    println!("{}", mapping_table(&outcome.mapping));
    if outcome.summary.is_complete() {
        println!("All required fields are mapped.");
    } else {
        let missing: Vec<&str> = outcome
            .summary
            .missing_required
            .iter()
            .map(ApplicationField::key)
            .collect();
        eprintln!("Missing required fields: {}", missing.join(", "));
    }
    println!(
        "{} of {} columns mapped, {} ignored",
        outcome.summary.mapped.len(),
        outcome.headers.len(),
        outcome.summary.ignored.len()
    );
    if let Some(path) = &outcome.saved_to {
        println!("Saved mapping: {}", path.display());
    }
}

pub fn print_mappings(outcome: &MappingsOutcome) {
    if let Some((name, removed)) = &outcome.deleted {
        if *removed {
            println!("Deleted mapping '{name}'");
        } else {
            eprintln!("No saved mapping named '{name}'");
        }
    }
    if outcome.names.is_empty() {
        println!("No saved mappings.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Saved mapping")]);
    apply_table_style(&mut table);
    for name in &outcome.names {
        table.add_row(vec![Cell::new(name)]);
    }
    println!("{table}");
}

pub fn print_preview(outcome: &PreviewOutcome) {
    print_report(outcome.kind, &outcome.report);
}

pub fn print_import(outcome: &ImportOutcome) {
    print_report(outcome.kind, &outcome.report);
    if !outcome.report.preview().valid {
        return;
    }
    match &outcome.commit {
        Some(summary) => print_commit(summary),
        None => println!("Dry run ({} mode): nothing was written.", outcome.mode),
    }
}

fn print_commit(summary: &CommitSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Committed"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Mode"), Cell::new(summary.mode)]);
    table.add_row(vec![Cell::new("Inserted"), count_cell(summary.inserted, Color::Green)]);
    table.add_row(vec![Cell::new("Removed"), count_cell(summary.removed, Color::Red)]);
    table.add_row(vec![
        Cell::new("Skipped duplicates"),
        count_cell(summary.skipped_duplicates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Skipped invalid"),
        count_cell(summary.skipped_invalid, Color::Red),
    ]);
    println!("{table}");
}

fn print_report(kind: SourceKind, report: &ImportReport) {
    let preview = report.preview();
    if !preview.valid {
        eprintln!("Import rejected:");
        for error in &preview.errors {
            eprintln!("- {error}");
        }
        return;
    }
    if let Some(mapping) = report.mapping() {
        println!("Mapping:");
        println!("{}", mapping_table(mapping));
    }
    println!("{}", totals_table(preview));
    print_valid_records(preview);
    print_invalid_records(kind, preview);
    print_duplicates(kind, preview);
}

fn mapping_table(mapping: &[FieldMapping]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for entry in mapping {
        let (field_cell, required) = match entry.target {
            MappingTarget::Field(field) => (
                Cell::new(format!("{} ({})", field.key(), field.label())).fg(Color::Green),
                required_cell(field.is_required()),
            ),
            MappingTarget::Ignore => (dim_cell("ignored"), dim_cell("-")),
        };
        table.add_row(vec![Cell::new(&entry.source_column), field_cell, required]);
    }
    table
}

fn totals_table(preview: &ImportPreview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Bucket"), header_cell("Records")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Valid"),
        count_cell(preview.valid_records.len(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Invalid"),
        count_cell(preview.invalid_records.len(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates"),
        count_cell(preview.duplicates.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(preview.total_records).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_valid_records(preview: &ImportPreview) {
    if preview.valid_records.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Company"),
        header_cell("Position"),
        header_cell("Status"),
        header_cell("Applied"),
    ]);
    apply_table_style(&mut table);
    for record in &preview.valid_records {
        table.add_row(vec![
            Cell::new(&record.company_name),
            Cell::new(&record.position),
            Cell::new(record.status),
            optional_cell(record.display_value(ApplicationField::AppliedDate)),
        ]);
    }
    println!();
    println!("Valid records:");
    println!("{table}");
}

fn print_invalid_records(kind: SourceKind, preview: &ImportPreview) {
    if preview.invalid_records.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(position_header(kind)), header_cell("Errors")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for invalid in &preview.invalid_records {
        table.add_row(vec![
            Cell::new(position_label(kind, invalid.index)),
            Cell::new(invalid.errors.join("\n")).fg(Color::Red),
        ]);
    }
    println!();
    println!("Invalid records:");
    println!("{table}");
}

fn print_duplicates(kind: SourceKind, preview: &ImportPreview) {
    if preview.duplicates.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(position_header(kind)),
        header_cell("Company"),
        header_cell("Position"),
        header_cell("Existing id"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for duplicate in &preview.duplicates {
        table.add_row(vec![
            Cell::new(position_label(kind, duplicate.index)),
            Cell::new(&duplicate.data.company_name),
            Cell::new(&duplicate.data.position),
            dim_cell(&duplicate.existing_id),
        ]);
    }
    println!();
    println!("Duplicates (skipped):");
    println!("{table}");
}

/// CSV records are shown by file line, JSON records by array index.
fn position_header(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Csv => "Line",
        SourceKind::Json => "Index",
    }
}

fn position_label(kind: SourceKind, index: usize) -> usize {
    match kind {
        SourceKind::Csv => index + 2,
        SourceKind::Json => index,
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: String) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
