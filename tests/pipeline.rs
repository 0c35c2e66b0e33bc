// tests/pipeline.rs

use spamsplit::{build_dataset, data_iterator, load_data, load_dataset, partition, Params, Split};
use std::fs;

fn write_source(dir: &std::path::Path, rows: usize) -> std::path::PathBuf {
    let mut raw = String::from("v2,v1\n");
    for i in 0..rows {
        let label = if i % 4 == 0 { "spam" } else { "ham" };
        raw.push_str(&format!("\"message {}, with a comma\",{}\n", i, label));
    }
    // malformed and empty-text rows never reach the splits
    raw.push_str("dangling line without label\n");
    raw.push_str(",ham\n");
    let path = dir.join("source.csv");
    fs::write(&path, raw).unwrap();
    path
}

#[test]
fn build_then_load_reproduces_every_split() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), 37);
    let out = dir.path().join("splits");

    let sizes = build_dataset(&source, &out).unwrap();
    assert_eq!(sizes.total(), 37);

    let dataset = load_dataset(&source).unwrap();
    let expected = partition(&dataset);
    let data = load_data(&Split::ALL, &out).unwrap();

    for (split, records) in expected.iter() {
        let loaded = &data[&split];
        assert_eq!(loaded.size(), records.len());
        let text: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(loaded.text(), text.as_slice());
        assert_eq!(loaded.labels(), labels.as_slice());
    }
}

#[test]
fn training_loop_sees_every_example_once_per_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), 250);
    build_dataset(&source, dir.path()).unwrap();

    let data = load_data(&[Split::Train], dir.path()).unwrap();
    let train = &data[&Split::Train];
    assert_eq!(train.size(), 175);

    let params = Params::default().with_batch_size(50);
    for _epoch in 0..2 {
        let lengths: Vec<usize> = data_iterator(train, &params, true).unwrap().map(|b| b.len()).collect();
        assert_eq!(lengths, vec![50, 50, 50, 25]);
    }

    let epoch_a: Vec<_> = data_iterator(train, &params, true).unwrap().collect();
    let epoch_b: Vec<_> = data_iterator(train, &params, true).unwrap().collect();
    assert_eq!(epoch_a, epoch_b);
}
