use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use wfcheck_validate::{BatchReport, Category, FarmReport, Finding};

/// Categories shown as columns of the farm summary, in check order.
const SUMMARY_CATEGORIES: [Category; 5] = [
    Category::Farm,
    Category::Region,
    Category::ManualModel,
    Category::WeatherSource,
    Category::PowerFix,
];

pub fn print_summary(batch: &BatchReport) {
    if !batch.farms.is_empty() {
        println!("{}", summary_table(batch));
    }
    print_error_table(batch);
    if !batch.failures.is_empty() {
        eprintln!("Failed farms:");
        for failure in &batch.failures {
            eprintln!("- {}: {}", failure.farm_id, failure.message);
        }
    }
}

/// One row per checked farm with error counts per category and a total row.
pub fn summary_table(batch: &BatchReport) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Farm"), header_cell("CID"), header_cell("Passed")];
    header.extend(SUMMARY_CATEGORIES.iter().map(|c| header_cell(c.label())));
    header.push(header_cell("Errors"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 2..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for farm in &batch.farms {
        table.add_row(farm_row(farm));
    }
    let mut total = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} farms", batch.farms.len())),
        Cell::new(batch.pass_count()).add_attribute(Attribute::Bold),
    ];
    for category in SUMMARY_CATEGORIES {
        let count = batch
            .farms
            .iter()
            .map(|farm| farm.error_count_in(category))
            .sum();
        total.push(count_cell(count, Color::Yellow).add_attribute(Attribute::Bold));
    }
    total.push(count_cell(batch.error_count(), Color::Red).add_attribute(Attribute::Bold));
    table.add_row(total);
    table
}

fn farm_row(farm: &FarmReport) -> Vec<Cell> {
    let farm_cell = if farm.has_errors() {
        Cell::new(&farm.wfid)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&farm.wfid)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    };
    let mut row = vec![
        farm_cell,
        match farm.cid.as_deref() {
            Some(cid) if !cid.is_empty() => Cell::new(cid),
            _ => dim_cell("-"),
        },
        Cell::new(farm.pass_count()),
    ];
    row.extend(
        SUMMARY_CATEGORIES
            .iter()
            .map(|&category| count_cell(farm.error_count_in(category), Color::Yellow)),
    );
    row.push(count_cell(farm.error_count(), Color::Red));
    row
}

fn print_error_table(batch: &BatchReport) {
    let errors: Vec<&Finding> = batch.farms.iter().flat_map(FarmReport::errors).collect();
    if errors.is_empty() {
        return;
    }
    println!();
    println!("Errors:");
    println!("{}", error_table(&errors));
}

/// Failed checks in the order they ran.
pub fn error_table(errors: &[&Finding]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Farm"),
        header_cell("Section"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_error_table_style(&mut table);
    for finding in errors {
        table.add_row(vec![
            Cell::new(&finding.wfid)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&finding.section),
            Cell::new(finding.category().label()).fg(Color::Yellow),
            Cell::new(finding.message()),
        ]);
    }
    table
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn apply_error_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
