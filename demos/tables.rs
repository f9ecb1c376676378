//! Lays out three demonstration tables onto A4 pages and writes `tables.pdf`.
//!
//! ```text
//! cargo run --example tables -- Regular.ttf Bold.ttf [out.pdf]
//! ```

use pdf_table::colours;
use pdf_table::layout::Margins;
use pdf_table::pagesize::A4;
use pdf_table::{
    row, Column, Document, Font, FlowConfig, FooterConfig, HorizontalAlignment, Pt, Table,
    TableError, TableFlow, VerticalAlignment,
};
use id_arena::Id;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<(), TableError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (regular, bold) = match args.as_slice() {
        [regular, bold, ..] => (regular, bold),
        _ => {
            eprintln!("usage: tables <regular.ttf> <bold.ttf> [output.pdf]");
            std::process::exit(2);
        }
    };
    let output = args.get(2).map(String::as_str).unwrap_or("tables.pdf");

    let mut doc = Document::default();
    let regular = doc.add_font(Font::load(std::fs::read(regular)?)?);
    let bold = doc.add_font(Font::load(std::fs::read(bold)?)?);

    let footer = FooterConfig::new(regular)
        .with_lines(["This document is an example of how to create PDF with tables."])
        .with_page_numbers();
    let config = FlowConfig::new(A4, regular, bold)
        .with_padding(Margins::trbl(Pt(10.0), Pt(0.0), Pt(40.0), Pt(20.0)))
        .with_footer(footer);

    let mut flow = TableFlow::new(doc, config);
    flow.position_at_page_top();

    flow.draw_heading("Table with vertical gap")?;
    flow.draw_table(&table_with_vertical_gap()?)?;

    flow.draw_heading("Table with overlapping optional columns")?;
    flow.draw_table(&table_with_optional_column()?)?;

    flow.draw_heading("Table on 2 pages")?;
    flow.draw_table(&table_on_two_pages()?)?;

    let doc = flow.finish()?;
    println!("{} pages written to {output}", doc.pages.len());
    doc.write(BufWriter::new(File::create(output)?))
}

fn table_with_vertical_gap() -> Result<Table<Id<Font>>, TableError> {
    let columns = vec![
        Column::new("Item Name", Pt(100.0)),
        Column::with_alignment("Qty", Pt(25.0), HorizontalAlignment::Center),
        Column::with_alignment("Sale Price", Pt(75.0), HorizontalAlignment::Right),
        Column::with_alignment("Commission", Pt(75.0), HorizontalAlignment::Right)
            .with_background(colours::MID_GREY),
        Column::with_alignment("Vat @ 10%", Pt(40.0), HorizontalAlignment::Right),
        Column::new("", Pt(30.0))
            .with_hidden_grid()
            .with_background(colours::WHITE),
        Column::with_alignment("Amount due", Pt(100.0), HorizontalAlignment::Right),
    ];
    let rows = vec![
        row(["Item 1", "1", "$100.00", "$20.00", "$2.00", "", "$78.00"]),
        row(["Item 2", "1", "$50.00", "$10.00", "$1.00", "", "$39.00"]),
        row(["Item 3 with a very long name", "1", "$10.00", "$2.00", "$0.20", "", "$7.80"]),
        row(["Item 4", "2", "$150.00", "$30.00", "$3.00", "", "$117.00"]),
    ];

    Ok(Table::new(columns, rows)?
        .with_headers()
        .with_grid()
        .with_cell_padding(Pt(3.0)))
}

fn table_with_optional_column() -> Result<Table<Id<Font>>, TableError> {
    let columns = vec![
        Column::new("", Pt(100.0)).with_overlap_next_column(),
        Column::unlabelled(Pt(60.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
        Column::unlabelled(Pt(50.0), HorizontalAlignment::Right, VerticalAlignment::Bottom),
    ];
    let rows = vec![
        row(["Product 1", "2 X $10.00", "$20.00"]),
        vec![Some("Fancy Product with long name".into()), None, Some("$10.00".into())],
        row(["Fancy Product with long name and quantity", "3 X $10.00", "$30.00"]),
    ];

    Ok(Table::new(columns, rows)?.with_cell_padding(Pt(2.0)))
}

fn table_on_two_pages() -> Result<Table<Id<Font>>, TableError> {
    const EMPLOYEES: [&str; 50] = [
        "Rosemary Olson", "Phil Turner", "Joyce Chambers", "Tara Coleman", "Jessie Padilla",
        "Carla Wilkerson", "Jacqueline Bridges", "Ana Adams", "Dewey Nash", "Nora Dean",
        "Antonio Martinez", "Sidney Shaw", "Irma Ramos", "Carol Knight", "Tom Stanley",
        "Richard Johnnie Matthews", "Penny Glover", "Rodolfo Smith", "Joanne Edwards",
        "Henrietta Adrienne Summers", "Julio Delgado", "Charles Davis", "Ross Jordan",
        "Olive Dunn", "Laurie Leonard", "George Harper", "Jan Waters", "Jane Scott",
        "Marty Holloway", "Gladys Snyder", "Leslie Schneider", "Van Alvarado", "May Sharp",
        "Arnold Rowe", "Belinda Huff", "Constance Charlene Douglas", "Pamela Myers",
        "Dorothy Curry", "Irene Andrews", "Jesse Sandoval", "Winifred Cruz", "Marco Pierce",
        "Antonia Bowman", "Roberta Carter", "Kelvin Gilbert", "Steve Cole", "Lamar Garcia",
        "Mable Potter", "Ira Rodriguez", "Mario Alvarez",
    ];

    let rows = EMPLOYEES
        .iter()
        .enumerate()
        .map(|(i, name)| row([name.to_string(), (i % 5 + 1).to_string()]))
        .collect();
    let columns = vec![
        Column::new("Employee", Pt(100.0)),
        Column::new("Department ID", Pt(100.0)),
    ];

    Ok(Table::new(columns, rows)?
        .with_headers()
        .with_grid()
        .with_cell_padding(Pt(3.0)))
}
