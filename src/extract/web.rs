//! Web page sources.
//!
//! A unit page carries several independent HTML tables:
//!
//! - the first table holds the unit title, `( <number> - <name> )`;
//! - the others are recognized by their first header cell: `Teóricos`,
//!   `Comisiones` (both required) and `Seminarios` (optional).
//!
//! Position beyond the first table carries no meaning.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ExtractConfig;
use crate::models::CourseUnit;

use super::table::fold_key;
use super::{extract_unit, Category, ExtractError, ExtractResult, Table};

static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*\d+\s*-\s*([^)]*?)\s*\)").expect("TITLE pattern is valid")
});

fn selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Html(e.to_string()))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts every `<table>` of a page, in document order.
///
/// The first row of each table is its header row; the table is named after
/// its first header cell.
pub fn parse_html_tables(html: &str) -> ExtractResult<Vec<Table>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;

    let tables = document
        .select(&table_sel)
        .map(|table| {
            let mut rows = table
                .select(&row_sel)
                .map(|row| row.select(&cell_sel).map(cell_text).collect::<Vec<_>>());
            let headers = rows.next().unwrap_or_default();
            let name = headers.first().cloned().unwrap_or_default();
            let mut parsed = Table::new(name, headers);
            for row in rows {
                parsed.push_row(row);
            }
            parsed
        })
        .collect();
    Ok(tables)
}

/// Reads the unit name out of the title table.
pub fn parse_title(table: &Table) -> ExtractResult<String> {
    TITLE
        .captures(&table.text())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(ExtractError::MissingTitle)
}

/// Builds a course unit from a page's HTML.
pub fn extract_from_html(html: &str, config: &ExtractConfig) -> ExtractResult<CourseUnit> {
    let tables = parse_html_tables(html)?;
    let (title, rest) = tables.split_first().ok_or(ExtractError::MissingTitle)?;
    let name = parse_title(title)?;

    let find = |category: Category| {
        let wanted = fold_key(category.web_header());
        rest.iter()
            .find(|t| t.first_header().is_some_and(|h| fold_key(h) == wanted))
    };
    let required = |category: Category| {
        find(category).ok_or_else(|| ExtractError::MissingTable(category.web_header().to_string()))
    };

    let unit = required(Category::Theory)
        .and_then(|theory| {
            let practice = required(Category::Practice)?;
            extract_unit(&name, theory, practice, find(Category::Seminar), config)
        })
        .map_err(|e| e.in_unit(&name))?;

    tracing::debug!(unit = %unit.name, tables = tables.len(), "parsed unit page");
    Ok(unit)
}

/// Fetches a unit page and extracts it.
pub fn fetch_unit(url: &str, config: &ExtractConfig) -> ExtractResult<CourseUnit> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;
    let html = client.get(url).send()?.error_for_status()?.text()?;
    tracing::debug!(url, bytes = html.len(), "fetched unit page");
    extract_from_html(&html, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ErrorKind;

    fn page(extra: &str) -> String {
        format!(
            r#"<html><body>
            <table><tr><td>Horarios de la materia ( 034 -  Psicología   General ) 2º cuatrimestre</td></tr></table>
            {extra}
            <table>
              <tr><th>Comisiones</th><th>Día</th><th>Inicio</th><th>Fin</th><th>Profesor</th><th>Observ.</th><th>Oblig.</th></tr>
              <tr><td>1</td><td>Miércoles</td><td>18:00</td><td>20:00</td><td>Lopez</td><td>-</td><td>I - S1</td></tr>
              <tr><td>2</td><td>Jueves</td><td>18:00</td><td>20:00</td><td>Diaz</td><td></td><td>II</td></tr>
            </table>
            <table>
              <tr><th> Teóricos </th><th>Día</th><th>Inicio</th><th>Fin</th><th>Profesor</th><th>Observ.</th></tr>
              <tr><td>I</td><td>Lunes</td><td>14:00</td><td>16:00</td><td>Perez</td><td>Aula 1. Sede Centro</td></tr>
              <tr><td>II</td><td>Martes</td><td>10:00</td><td>12:00</td><td>Gomez</td><td></td></tr>
            </table>
            </body></html>"#
        )
    }

    const SEMINARS: &str = r#"
        <table>
          <tr><th>Seminarios</th><th>Día</th><th>Inicio</th><th>Fin</th><th>Profesor</th><th>Observ.</th></tr>
          <tr><td>S1</td><td>Viernes</td><td>08:00</td><td>10:00</td><td>Ruiz</td><td></td></tr>
        </table>"#;

    #[test]
    fn test_parse_html_tables() {
        let tables = parse_html_tables(&page("")).unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[1].name, "Comisiones");
        assert_eq!(tables[1].row_count(), 2);
        assert_eq!(tables[2].first_header(), Some("Teóricos"));
        assert_eq!(tables[2].cell(0, 5), "Aula 1. Sede Centro");
    }

    #[test]
    fn test_title_pattern() {
        let title = Table::new("t", ["Materia ( 034 - Psicología General )"]);
        assert_eq!(parse_title(&title).unwrap(), "Psicología General");

        let no_title = Table::new("t", ["Psicología General"]);
        assert!(matches!(parse_title(&no_title), Err(ExtractError::MissingTitle)));
        let no_number = Table::new("t", ["( Psicología - General )"]);
        assert!(parse_title(&no_number).is_err());
    }

    #[test]
    fn test_extract_from_html_by_header_not_position() {
        let unit = extract_from_html(&page(SEMINARS), &ExtractConfig::default()).unwrap();
        assert_eq!(unit.name, "Psicología General");
        assert_eq!(unit.offering_count(), 2);

        let first = &unit.offerings()[0];
        assert_eq!(first.id(), "1");
        assert_eq!(first.blocks.len(), 3);
        assert_eq!(
            first.blocks[0].observation.as_deref(),
            Some("Aula 1\nSede Centro")
        );
        assert_eq!(unit.offerings()[1].blocks.len(), 2);
    }

    #[test]
    fn test_missing_seminar_table_fails_only_on_reference() {
        // Commission 1 needs S1; without the seminar table it cannot resolve.
        let err = extract_from_html(&page(""), &ExtractConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().starts_with("unit 'Psicología General'"));
    }

    #[test]
    fn test_missing_required_tables() {
        let html = r#"<table><tr><td>( 1 - Algebra )</td></tr></table>
            <table><tr><th>Comisiones</th><th>Dia</th></tr></table>"#;
        let err = extract_from_html(html, &ExtractConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.to_string().contains("'Teóricos'"));

        let empty = extract_from_html("<html></html>", &ExtractConfig::default()).unwrap_err();
        assert!(matches!(empty, ExtractError::MissingTitle));
    }
}
