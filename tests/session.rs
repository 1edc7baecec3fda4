use std::io::Write;

use digit_net::data::codec::normalize_pixel;
use digit_net::{load_window, Error, Network, NetworkSpec, RunConfig, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

const SAMPLE: &str = "0,10,20,30,40";

fn dataset(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn small_session(seed: u64) -> Session {
    let spec = NetworkSpec::new(4, 3, 2, 0.5);
    let network = Network::with_rng(spec, &mut StdRng::seed_from_u64(seed)).unwrap();
    Session::with_network(network, RunConfig::default())
}

fn trained_on_sample() -> Session {
    let mut session = small_session(42);
    session.set_training_data(vec![SAMPLE.to_string()]);
    session.train(200, |_| {}).unwrap();
    session
}

#[test]
fn window_selects_requested_lines() {
    let file = dataset(&["a", "b", "c", "d", "e"]);

    assert_eq!(load_window(file.path(), 3, 1), vec!["b", "c", "d"]);
    assert_eq!(load_window(file.path(), 0, 1), vec!["b", "c", "d", "e"]);
    assert!(load_window(file.path(), 2, 5).is_empty());
}

#[test]
fn failed_load_keeps_previous_buffer() {
    let good = dataset(&["header", SAMPLE, "1,40,30,20,10"]);
    let empty = dataset(&[]);
    let mut session = small_session(1);

    assert_eq!(session.load_training_set(good.path(), 0, 1).unwrap(), 2);

    let err = session.load_training_set(empty.path(), 0, 0).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { .. }));
    assert!(err.to_string().contains("Failed to load dataset"));

    let missing = good.path().with_extension("missing");
    assert!(session.load_training_set(&missing, 0, 0).is_err());

    assert_eq!(session.training_len(), 2);
    assert_eq!(session.evaluation_len(), 0);
}

#[test]
fn training_on_one_record_favours_its_class() {
    let session = trained_on_sample();
    let inputs: Vec<f64> = [10.0, 20.0, 30.0, 40.0].iter().map(|&p| normalize_pixel(p)).collect();

    let out = session.network().forward(&inputs);
    assert!(out[0] > out[1], "outputs = {:?}", out);
    assert_eq!(session.total_trained(), 200);
}

#[test]
fn accuracy_accumulates_over_queries() {
    let mut session = trained_on_sample();
    let wrong = "1,10,20,30,40";

    let mut first = vec![SAMPLE; 8];
    first.extend([wrong, wrong]);
    session.set_evaluation_data(first.iter().map(|s| s.to_string()).collect());
    let pass = session.query(|_| {}).unwrap();
    assert_eq!((pass.evaluated, pass.correct), (10, 8));

    let mut second = vec![SAMPLE; 4];
    second.push(wrong);
    session.set_evaluation_data(second.iter().map(|s| s.to_string()).collect());
    let pass = session.query(|_| {}).unwrap();
    assert_eq!((pass.evaluated, pass.correct), (5, 4));

    assert!((session.accuracy() - 80.0).abs() < 1e-9);
    assert_eq!(session.total_evaluated(), 15);
    assert_eq!(session.total_correct(), 12);
    assert_eq!(session.total_trained(), 200);

    let last = session.record_info(4).unwrap();
    assert_eq!((last.predicted, last.actual), (0, 1));
    assert_eq!(session.record_info(5), None);
}

#[test]
fn end_to_end_from_files_with_header() {
    let train = dataset(&["label,p1,p2,p3,p4", SAMPLE, "1,200,220,240,250"]);
    let test = dataset(&["label,p1,p2,p3,p4", SAMPLE, "1,200,220,240,250"]);
    let mut session = small_session(9);

    assert_eq!(session.load_training_set(train.path(), 0, 1).unwrap(), 2);
    let mut last = 0;
    let summary = session.train(300, |n| last = n).unwrap();
    assert_eq!(summary.records, 600);
    assert_eq!(last, 600);

    assert_eq!(session.load_evaluation_set(test.path(), 0, 1).unwrap(), 2);
    let pass = session.query(|_| {}).unwrap();
    assert_eq!(pass.evaluated, 2);
    assert_eq!(session.scorecard().len(), 2);
    assert_eq!(session.record_pixels(1).unwrap(), Some(vec![200.0, 220.0, 240.0, 250.0]));
}

#[test]
fn header_row_is_a_format_error_when_not_skipped() {
    let train = dataset(&["label,p1,p2,p3,p4", SAMPLE]);
    let mut session = small_session(3);

    session.load_training_set(train.path(), 0, 0).unwrap();
    let err = session.train(1, |_| {}).unwrap_err();
    assert!(matches!(err, Error::Format { record: Some(1), .. }), "got {:?}", err);
}
