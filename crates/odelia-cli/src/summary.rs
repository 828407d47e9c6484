use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use odelia_cli::pipeline::{DescribeOutcome, ReconcileOutcome};
use odelia_model::CanonicalLabel;

pub fn print_reconcile_summary(outcome: &ReconcileOutcome) {
    let summary = &outcome.summary;
    println!("Input: {}", summary.input);
    println!("Label column: {}", summary.label_column);
    println!("Cases: {}", summary.cases);
    if let Some(merge) = &outcome.merge {
        println!(
            "Labels merged from '{}': {} matched, {} unmatched",
            merge.source_column, merge.matched, merge.unmatched
        );
    }
    println!("Output: {}", outcome.output_dir.display());

    let mut table = Table::new();
    let mut header = vec![header_cell("Group"), header_cell("Cases")];
    header.extend(CanonicalLabel::ALL.iter().map(|label| header_cell(label.as_str())));
    header.push(header_cell("Index"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for column in 1..=CanonicalLabel::ALL.len() + 1 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for group in &summary.groups {
        let mut row = vec![
            Cell::new(&group.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(group.cases, Color::Green),
        ];
        row.extend(
            CanonicalLabel::ALL
                .iter()
                .map(|label| count_cell(group.labels.get(label).copied().unwrap_or(0), Color::White)),
        );
        row.push(Cell::new(&group.index_file));
        table.add_row(row);
    }
    println!("{table}");
    print_errors(&outcome.errors);
}

pub fn print_describe_summary(outcome: &DescribeOutcome) {
    let summary = &outcome.summary;
    println!("Input: {}", summary.input);
    println!("Cases: {}", summary.cases);
    println!("Output: {}", outcome.output_dir.display());

    let mut institutions = Table::new();
    institutions.set_header(vec![header_cell("Institution"), header_cell("Cases")]);
    apply_table_style(&mut institutions);
    align_column(&mut institutions, 1, CellAlignment::Right);
    for entry in &summary.institutions {
        institutions.add_row(vec![Cell::new(&entry.institution), Cell::new(entry.cases)]);
    }
    println!("{institutions}");

    let mut modalities = Table::new();
    modalities.set_header(vec![header_cell("Modality"), header_cell("Cases")]);
    apply_table_style(&mut modalities);
    align_column(&mut modalities, 1, CellAlignment::Right);
    for entry in &summary.modalities {
        modalities.add_row(vec![Cell::new(&entry.modality), count_cell(entry.cases, Color::Green)]);
    }
    println!("{modalities}");

    match &summary.age {
        Some(age) => {
            println!(
                "Age: n={} min={:.1} max={:.1} mean={:.1}",
                age.count, age.min, age.max, age.mean
            );
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Institution"),
                header_cell("n"),
                header_cell("min"),
                header_cell("q1"),
                header_cell("median"),
                header_cell("q3"),
                header_cell("max"),
            ]);
            apply_table_style(&mut table);
            for column in 1..7 {
                align_column(&mut table, column, CellAlignment::Right);
            }
            for entry in &age.by_institution {
                let s = &entry.summary;
                table.add_row(vec![
                    Cell::new(&entry.institution),
                    Cell::new(entry.count),
                    Cell::new(format!("{:.1}", s.min)),
                    Cell::new(format!("{:.1}", s.q1)),
                    Cell::new(format!("{:.1}", s.median)),
                    Cell::new(format!("{:.1}", s.q3)),
                    Cell::new(format!("{:.1}", s.max)),
                ]);
            }
            println!("{table}");
        }
        None => println!("Age: not available"),
    }
    print_errors(&outcome.errors);
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for error in errors {
        eprintln!("- {error}");
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
        .set_width(120);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
