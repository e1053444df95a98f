use cost_sheet_processor::constants::{LABOR_TERMINAL_MARKER, MATERIALS_TERMINAL_MARKER};
use cost_sheet_processor::{ParseOptions, ReportParser};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const ROWS_PER_PAGE: usize = 48;

fn material_row(index: usize, unit_price: &str, amount: &str) -> String {
    format!(
        "{:<16}{:<41}{:>11}{:>12}{:>16}{:>16}",
        format!("REF{:06}", index),
        "CABLE LILA 1,5 CPR LH CCA",
        "18/06/2024",
        "40,00",
        unit_price,
        amount
    )
}

fn labor_row(index: usize, unit_price: &str, amount: &str) -> String {
    format!(
        "{:>4} {:<24}{:>11}{:>5} {:<24}{:>8}{:>8}{:>9}{:>7}{:>11}",
        index % 1000,
        "ARMADO DE CUADRO DE DINA",
        "20/08/2024",
        "109",
        "GARCIA RODRIGUEZ, KEVIN",
        "3,00",
        unit_price,
        "12,50",
        "4,00",
        amount
    )
}

/// A report with `rows` materials and `rows` labor lines, split into pages
fn synthetic_report(rows: usize, sell: bool) -> Vec<String> {
    let (material_price, labor_price) = if sell {
        (("0,35", "14,00"), ("45,00", "135,00"))
    } else {
        (("0,20", "8,00"), ("30,00", "90,00"))
    };

    let mut lines = vec![
        "HOJA DE COSTE POR ORDEN DE TRABAJO".to_string(),
        String::new(),
        String::new(),
        "     O.T.  240117   CUADRO GENERAL NAVE 3".to_string(),
        String::new(),
        "     Desde Fecha  01/01/2024      Hasta Fecha  31/12/2024".to_string(),
        String::new(),
        format!("{}M A T E R I A L{}", "_".repeat(49), "_".repeat(49)),
        "Referencia       Descripción                              Fecha".to_string(),
        "_".repeat(113),
    ];

    for index in 0..rows {
        if index > 0 && index % ROWS_PER_PAGE == 0 {
            lines.push(String::new());
        }
        lines.push(material_row(index, material_price.0, material_price.1));
    }
    lines.push(MATERIALS_TERMINAL_MARKER.to_string());
    lines.push(String::new());

    lines.push(format!(
        "{}M A N O   D E   O B R A{}",
        "_".repeat(45),
        "_".repeat(45)
    ));
    lines.push("Op.  Operación                Fecha".to_string());
    lines.push("_".repeat(113));
    for index in 0..rows {
        if index > 0 && index % ROWS_PER_PAGE == 0 {
            lines.push(String::new());
        }
        lines.push(labor_row(index, labor_price.0, labor_price.1));
    }
    lines.push(LABOR_TERMINAL_MARKER.to_string());

    lines
}

fn bench_parse_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_report");

    for rows in [100, 1_000, 10_000] {
        let cost = synthetic_report(rows, false);
        let sell = synthetic_report(rows, true);
        let no_sell: Vec<String> = Vec::new();

        let parser = match ReportParser::new(ParseOptions::default()) {
            Ok(parser) => parser,
            Err(e) => panic!("parser construction failed: {}", e),
        };

        group.throughput(Throughput::Elements((rows * 2) as u64));
        group.bench_with_input(BenchmarkId::new("cost_and_sell", rows), &rows, |b, _| {
            b.iter(|| parser.parse(black_box("240117"), black_box(&cost), black_box(&sell)))
        });
        group.bench_with_input(BenchmarkId::new("cost_only", rows), &rows, |b, _| {
            b.iter(|| parser.parse(black_box("240117"), black_box(&cost), black_box(&no_sell)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_report);
criterion_main!(benches);
