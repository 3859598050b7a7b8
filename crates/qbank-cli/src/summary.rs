//! Terminal tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use qbank_model::Question;

/// Longest stretch of question text shown in a table cell.
const TEXT_PREVIEW_CHARS: usize = 80;

pub fn question_table(questions: &[Question]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Question"),
        header_cell("Subject"),
        header_cell("Topic"),
        header_cell("Image"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(4)),
        ColumnConstraint::UpperBoundary(Width::Percentage(50)),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for question in questions {
        table.add_row(vec![
            Cell::new(question.id()).add_attribute(Attribute::Bold),
            Cell::new(preview(question.text())),
            optional_cell(question.subject()),
            optional_cell(question.topic()),
            if question.has_image() {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("-")
            },
            created_cell(question),
        ]);
    }
    table
}

/// One-column table of filter choices.
pub fn choice_table(title: &str, choices: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title)]);
    apply_table_style(&mut table);
    for choice in choices {
        table.add_row(vec![Cell::new(choice)]);
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn optional_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn created_cell(question: &Question) -> Cell {
    match question.created_at() {
        Some(created) => Cell::new(created.format("%Y-%m-%d %H:%M")),
        None => dim_cell(question.created_at_raw()),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// First line of `text`, cut to [`TEXT_PREVIEW_CHARS`], with `…` when
/// anything visible was left out.
fn preview(text: &str) -> String {
    let mut lines = text.lines();
    let first_line = lines.next().unwrap_or_default();
    let cut = first_line.chars().count() > TEXT_PREVIEW_CHARS;
    let more_lines = lines.any(|line| !line.trim().is_empty());

    let mut shown: String = first_line.chars().take(TEXT_PREVIEW_CHARS).collect();
    if cut || more_lines {
        shown.push('…');
    }
    shown
}
