use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use salary_survey_etl::survey;
use salary_survey_etl::transform::Transformer;
use salary_survey_etl::types::{DataSet, Schema, Value};

const TITLES: &[&str] = &[
    "Senior Software Engineer!!",
    "Data Analyst II",
    "Head of People",
    "Librarian",
    "Jr. Developer (contract)",
];

const CITIES: &[&str] = &["Portland", "remote", "SÃ£o Paulo", "  new   york ", "N/A"];

fn synthetic_survey(rows: usize) -> DataSet {
    let headers: Vec<&str> = survey::required_raw_headers().collect();
    let rows = (0..rows)
        .map(|i| {
            headers
                .iter()
                .map(|h| {
                    let answer = match survey::canonical_name(h) {
                        Some(survey::TIMESTAMP) => format!("4/{}/2021 11:02:10", 1 + i % 28),
                        Some(survey::JOB_TITLE) => TITLES[i % TITLES.len()].to_string(),
                        Some(survey::ANNUAL_SALARY) => format!("${},000", 40 + i % 200),
                        Some(survey::CURRENCY) => "US Dollar".to_string(),
                        Some(survey::COUNTRY) => "U.S.A.".to_string(),
                        Some(survey::STATE) => "California, US".to_string(),
                        Some(survey::CITY) => CITIES[i % CITIES.len()].to_string(),
                        Some(survey::GENDER) => "Woman".to_string(),
                        Some(survey::EXPERIENCE) => "2 - 4 years".to_string(),
                        _ => return Value::Null,
                    };
                    Value::from(answer.as_str())
                })
                .collect()
        })
        .collect();
    DataSet::new(Schema::utf8(headers.iter().copied()), rows)
}

fn bench_transform(c: &mut Criterion) {
    let raw = synthetic_survey(10_000);
    let transformer = Transformer::default();

    c.bench_function("transform_10k_rows", |b| {
        b.iter_batched(
            || raw.clone(),
            |ds| black_box(transformer.transform(ds)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
