use file_dispatch::{
    CancelToken, DispatchOutcome, DispatchRequest, ItemResult, ProgressEvent, list_files,
    run_dispatch,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn collect(request: &DispatchRequest, cancel: &CancelToken) -> (DispatchOutcome, Vec<ProgressEvent>) {
    let mut events = Vec::new();
    let outcome = run_dispatch(request, cancel, |e| events.push(e));
    (outcome, events)
}

fn items(events: &[ProgressEvent]) -> Vec<&ItemResult> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Item(item) => Some(item),
            ProgressEvent::Count(_) => None,
        })
        .collect()
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), name).unwrap();
}

#[test]
fn missing_directory_is_error_input_without_events() {
    let td = tempdir().unwrap();
    let request = DispatchRequest::new(td.path().join("nope"), r"(?<name>\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());
    assert_eq!(outcome, DispatchOutcome::ErrorInput);
    assert!(events.is_empty());
}

#[test]
fn empty_directory_is_error_input_without_events() {
    let td = tempdir().unwrap();
    // Sub-directories alone do not count as files.
    fs::create_dir(td.path().join("already_sorted")).unwrap();
    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());
    assert_eq!(outcome, DispatchOutcome::ErrorInput);
    assert!(events.is_empty());
}

#[test]
fn file_given_as_source_is_error_input() {
    let td = tempdir().unwrap();
    touch(td.path(), "A1.txt");
    let request = DispatchRequest::new(td.path().join("A1.txt"), r"(?<name>\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());
    assert_eq!(outcome, DispatchOutcome::ErrorInput);
    assert!(events.is_empty());
}

#[test]
fn count_first_then_one_item_per_file_in_enumeration_order() {
    let td = tempdir().unwrap();
    for name in ["A1.txt", "B2.txt", "C3.txt", "D4.txt", "nomatch.txt"] {
        touch(td.path(), name);
    }
    let expected_order = list_files(td.path()).unwrap();

    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());

    assert_eq!(outcome, DispatchOutcome::Ok);
    assert_eq!(events.first(), Some(&ProgressEvent::Count(5)));
    assert_eq!(
        events.iter().filter(|e| matches!(e, ProgressEvent::Count(_))).count(),
        1
    );
    let paths: Vec<_> = items(&events).iter().map(|i| i.path.clone()).collect();
    assert_eq!(paths, expected_order);
}

#[test]
fn every_matching_file_lands_in_its_subfolder() {
    let td = tempdir().unwrap();
    for name in ["A1.txt", "B1.txt", "C2.txt"] {
        touch(td.path(), name);
    }
    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)\.txt$").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());

    assert_eq!(outcome, DispatchOutcome::Ok);
    assert!(items(&events).iter().all(|i| i.success));
    assert!(td.path().join("1").join("A1.txt").is_file());
    assert!(td.path().join("1").join("B1.txt").is_file());
    assert!(td.path().join("2").join("C2.txt").is_file());
    assert!(list_files(td.path()).unwrap().is_empty());
}

#[test]
fn report_scenario_moves_matches_and_keeps_notes() {
    let td = tempdir().unwrap();
    for name in ["Report_2024.pdf", "Report_2024.txt", "Notes.pdf"] {
        touch(td.path(), name);
    }
    let request = DispatchRequest::new(td.path(), r"^(?<name>Report_\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());

    assert_eq!(outcome, DispatchOutcome::Ok);
    let sub = td.path().join("Report_2024");
    assert!(sub.is_dir());
    assert!(sub.join("Report_2024.pdf").is_file());
    assert!(sub.join("Report_2024.txt").is_file());
    assert!(td.path().join("Notes.pdf").is_file());

    let notes = items(&events)
        .into_iter()
        .find(|i| i.path.ends_with("Notes.pdf"))
        .expect("item for Notes.pdf");
    assert!(!notes.success);
    assert_eq!(
        notes.to_string(),
        "[NG] file name does not match the sub-folder-name pattern Notes.pdf"
    );
}

#[test]
fn collision_failure_does_not_stop_the_run() {
    let td = tempdir().unwrap();
    touch(td.path(), "A123.txt");
    touch(td.path(), "B7.txt");
    // A plain file named like A123's sub-folder.
    fs::write(td.path().join("123"), "occupied").unwrap();

    let request = DispatchRequest::new(td.path(), r"^[a-z](?<name>\d+)\.txt$").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());

    assert_eq!(outcome, DispatchOutcome::Ok);
    // "123" itself does not match and is reported too.
    assert_eq!(events.first(), Some(&ProgressEvent::Count(3)));
    let a = items(&events)
        .into_iter()
        .find(|i| i.path.ends_with("A123.txt"))
        .unwrap();
    assert!(!a.success);
    assert_eq!(a.message, "a file with the same name as the sub-folder already exists");
    assert!(td.path().join("A123.txt").is_file());
    assert!(td.path().join("7").join("B7.txt").is_file());
}

#[test]
fn cancel_after_k_items_stops_before_the_next_file() {
    let td = tempdir().unwrap();
    for name in ["A1.txt", "B2.txt", "C3.txt", "D4.txt", "E5.txt"] {
        touch(td.path(), name);
    }
    let order = list_files(td.path()).unwrap();
    let k = 2;

    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    let cancel = CancelToken::new();
    let mut events = Vec::new();
    let outcome = run_dispatch(&request, &cancel, |e| {
        events.push(e);
        if items(&events).len() == k {
            cancel.cancel();
        }
    });

    assert_eq!(outcome, DispatchOutcome::Cancel);
    assert_eq!(events.len(), k + 1);
    assert_eq!(events[0], ProgressEvent::Count(5));
    for moved in &order[..k] {
        assert!(!moved.exists(), "{} should have moved", moved.display());
    }
    for untouched in &order[k..] {
        assert!(untouched.is_file(), "{} should be unmoved", untouched.display());
    }
}

#[test]
fn cancel_before_start_emits_only_the_count() {
    let td = tempdir().unwrap();
    touch(td.path(), "A1.txt");
    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();

    let (outcome, events) = collect(&request, &cancel);
    assert_eq!(outcome, DispatchOutcome::Cancel);
    assert_eq!(events, vec![ProgressEvent::Count(1)]);
    assert!(td.path().join("A1.txt").is_file());
}

#[test]
fn second_run_reuses_existing_subfolders() {
    let td = tempdir().unwrap();
    touch(td.path(), "A1.txt");
    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    assert_eq!(collect(&request, &CancelToken::new()).0, DispatchOutcome::Ok);

    touch(td.path(), "B1.txt");
    let (outcome, events) = collect(&request, &CancelToken::new());
    assert_eq!(outcome, DispatchOutcome::Ok);
    assert_eq!(events.first(), Some(&ProgressEvent::Count(1)));
    assert!(td.path().join("1").join("A1.txt").is_file());
    assert!(td.path().join("1").join("B1.txt").is_file());
}

#[test]
fn missing_directory_is_a_listing_error() {
    let td = tempdir().unwrap();
    assert!(list_files(&td.path().join("nope")).is_err());
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_listed_and_moved_as_links() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    touch(td.path(), "real");
    touch(td.path(), "A1");
    let target = td.path().join("real");
    symlink(&target, td.path().join("L5.lnk")).unwrap();
    // A directory already sits where A1 would land.
    fs::create_dir_all(td.path().join("1").join("A1")).unwrap();

    let request = DispatchRequest::new(td.path(), r"(?<name>\d+)").unwrap();
    let (outcome, events) = collect(&request, &CancelToken::new());

    assert_eq!(outcome, DispatchOutcome::Ok);
    assert_eq!(events.first(), Some(&ProgressEvent::Count(3)));

    let link = items(&events)
        .into_iter()
        .find(|i| i.path.ends_with("L5.lnk"))
        .expect("item for the link");
    assert!(link.success, "link item: {}", link.message);
    let moved = td.path().join("5").join("L5.lnk");
    assert!(fs::symlink_metadata(&moved).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&moved).unwrap(), target);
    assert!(target.is_file(), "the link target itself stays put");

    let a1 = items(&events)
        .into_iter()
        .find(|i| i.path.ends_with("A1"))
        .unwrap();
    assert!(!a1.success);
    assert_eq!(a1.message, "a file with the same name already exists at the destination");
    assert!(td.path().join("A1").is_file());
}
