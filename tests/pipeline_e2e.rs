// tests/pipeline_e2e.rs
use offer_watch::config::options::Variant;
use offer_watch::extract::{ScanExtractor, TableExtractor};
use offer_watch::records::build_records;
use offer_watch::select::select_best;
use offer_watch::{
    AliasTable, CanonicalField, OfferError, Pair, PairSet, Pipeline, extract_tables,
};

const CATALOG: &str = r#"<!DOCTYPE html>
<html>
<body>
  <table class="menu">
    <tr><td>Menu</td><td>Link</td></tr>
    <tr><td>Home</td><td>/</td></tr>
  </table>

  <table class="offers">
    <tr>
      <th>Offer ID</th><th>Сайт</th><th>Домен</th><th>Категория</th><th>Продажа</th>
      <th>Условия</th><th>Motivation Amount</th><th>Offer Duration, days</th>
      <th>Юридическое лицо</th><th>Green Probability</th>
    </tr>
    <tr>
      <td>101</td><td>Example</td><td>example.com</td><td>Retail</td><td>10%</td>
      <td>New customers</td><td>1&nbsp;500</td><td>30</td><td>OOO Example</td><td>0,8</td>
    </tr>
    <tr>
      <td>102</td><td>Example</td><td>example.com</td><td>Retail</td><td>10%</td>
      <td>All customers</td><td>700</td><td>14</td><td>OOO Example</td><td>0,4</td>
    </tr>
  </table>
</body>
</html>"#;

fn extractors() -> Vec<Box<dyn TableExtractor>> {
    let mut v: Vec<Box<dyn TableExtractor>> = vec![Box::new(ScanExtractor)];
    #[cfg(feature = "tree")]
    v.push(Box::new(offer_watch::extract::TreeExtractor));
    v
}

#[test]
fn bilingual_catalog_yields_two_offers_and_one_pair() {
    for extractor in extractors() {
        let name = extractor.name();
        let tables = extractor.extract(CATALOG);
        assert_eq!(tables.len(), 2, "{name}");

        let aliases = AliasTable::builtin();
        let sel = select_best(&tables, &aliases).unwrap();
        assert_eq!(sel.table_index, 1, "{name}");
        assert_eq!(sel.header_row, 0, "{name}");
        assert_eq!(sel.mapping.len(), CanonicalField::COUNT, "{name}");

        let records = build_records(sel.table, &sel.mapping, sel.header_row).unwrap();
        assert_eq!(records.len(), 2, "{name}");
        assert_eq!(records[0].get(CanonicalField::Id), "101");
        assert_eq!(records[0].get(CanonicalField::MotivationAmount), "1 500", "{name}");
        assert_eq!(records[1].get(CanonicalField::OfferDuration), "14");

        let report = Pipeline::new(aliases, extractor).run(CATALOG, &PairSet::new()).unwrap();
        assert_eq!(report.counts.len(), 1);
        assert_eq!(report.counts[&Pair::new("example.com", "10%")], 2);
        assert_eq!(report.message, "Новые пары (domain + sale):\n+ example.com | 10%");
    }
}

#[test]
fn coerced_variant_keys_pairs_on_coerced_text() {
    let pipeline = Pipeline::new(AliasTable::builtin(), Box::new(ScanExtractor))
        .with_variant(Variant::Coerced);
    let report = pipeline.run(CATALOG, &PairSet::new()).unwrap();

    assert_eq!(report.current_pairs().into_iter().collect::<Vec<_>>(), vec![Pair::new("example.com", "10")]);
    let typed = report.coerced.as_ref().unwrap();
    assert_eq!(typed.len(), 2);
    assert_eq!(report.offers[0].get(CanonicalField::MotivationAmount), "1500");
    assert_eq!(report.offers[0].get(CanonicalField::GreenProbability), "0.8");
    assert_eq!(report.rows()[1][0], "102");
}

#[test]
fn second_run_over_same_page_reports_no_changes() {
    let pipeline = Pipeline::default();
    let first = pipeline.run(CATALOG, &PairSet::new()).unwrap();
    let second = pipeline.run(CATALOG, &first.current_pairs()).unwrap();
    assert!(!second.comparison.has_changes());
    assert_eq!(second.message, "Изменений нет.");
}

#[test]
fn page_without_tables_is_no_offer_table() {
    let html = "<html><body><p>Service temporarily unavailable</p></body></html>";
    assert!(extract_tables(html).is_empty());
    let err = Pipeline::default().run(html, &PairSet::new()).unwrap_err();
    assert_eq!(err, OfferError::NoOfferTable);
}

#[test]
fn unknown_headers_fail_resolution_with_a_sample() {
    let html = "<table><tr><td>Foo</td><td>Bar</td></tr><tr><td>1</td><td>2</td></tr></table>";
    let err = Pipeline::new(AliasTable::builtin(), Box::new(ScanExtractor))
        .run(html, &PairSet::new())
        .unwrap_err();
    match &err {
        OfferError::HeaderResolutionFailed { tables, sample } => {
            assert_eq!(*tables, 1);
            assert_eq!(sample, &vec!["Foo | Bar".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("update the alias table"));
}

#[test]
fn header_with_only_blank_rows_below_is_no_offer_rows() {
    let html = "<table><tr><th>Domain</th><th>Sale</th></tr><tr><td></td><td> </td></tr></table>";
    let err = Pipeline::new(AliasTable::builtin(), Box::new(ScanExtractor))
        .run(html, &PairSet::new())
        .unwrap_err();
    assert!(matches!(err, OfferError::NoOfferRows { header_row: 0, scanned: 1, .. }));
}

#[test]
fn custom_aliases_replace_builtin_sets() {
    let html = "<table><tr><td>Площадка</td><td>Бонус</td></tr><tr><td>x.ru</td><td>3%</td></tr></table>";
    let overlay = AliasTable::from_json(r#"{ "domain": ["площадка"], "sale": ["бонус"] }"#).unwrap();
    let aliases = AliasTable::builtin().overlay(&overlay);

    let report = Pipeline::new(aliases, Box::new(ScanExtractor)).run(html, &PairSet::new()).unwrap();
    assert_eq!(report.offers.len(), 1);
    assert!(report.counts.contains_key(&Pair::new("x.ru", "3%")));
}

#[test]
fn truncated_page_does_not_invent_a_half_offer() {
    let html = "<table><tr><th>Domain</th><th>Sale</th></tr>\
                <tr><td>a.com</td><td>5%</td></tr>\
                <tr><td>b.com</td><td>7";
    let report = Pipeline::default().run(html, &PairSet::new()).unwrap();
    assert_eq!(report.counts.len(), 1);
    assert_eq!(report.counts[&Pair::new("a.com", "5%")], 1);
    assert_eq!(report.message, "Новые пары (domain + sale):\n+ a.com | 5%");

    let same = Pipeline::new(AliasTable::builtin(), Box::new(ScanExtractor))
        .run(html, &PairSet::new())
        .unwrap();
    assert_eq!(same.counts, report.counts);
}
