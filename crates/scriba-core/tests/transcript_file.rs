//! Transcript file IO, equality and evaluation against real files.

use scriba_core::{TranscriptFile, TranscriptFormat};

const VTT_CONTENT: &str =
    "WEBVTT\n\n00:00.000 --> 00:02.000\nMay I help you?\n\n00:02.500 --> 00:05.000\nYes, please.\n";

// Same speech, different grammar and different cue timings.
const SRT_CONTENT: &str =
    "1\n00:00:00,000 --> 00:00:01,800\nMay I help you?\n\n2\n00:00:02,300 --> 00:00:04,900\nYes, please.\n";

#[test]
fn test_write_creates_parent_directories_and_reads_back() {
    let workspace = tempfile::tempdir().unwrap();
    let path = workspace.path().join("nested/deeper/test.txt");

    let transcript =
        TranscriptFile::write(&path, "May I help you?\n", TranscriptFormat::Txt, "en").unwrap();

    assert_eq!(transcript.path, path);
    assert_eq!(transcript.read().unwrap(), "May I help you?\n");
}

#[test]
fn test_read_missing_file_fails_with_not_found() {
    let workspace = tempfile::tempdir().unwrap();
    let transcript = TranscriptFile::new(
        workspace.path().join("never-written.txt"),
        "en",
        TranscriptFormat::Txt,
    );

    let error = transcript.read().unwrap_err();
    match error {
        scriba_core::TranscriptionError::Io(io_error) => {
            assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_identical_files_are_strictly_equal() {
    let workspace = tempfile::tempdir().unwrap();

    let first = TranscriptFile::write(
        workspace.path().join("test1.txt"),
        "test2",
        TranscriptFormat::Txt,
        "",
    )
    .unwrap();
    let second = TranscriptFile::write(
        workspace.path().join("test2.txt"),
        "test2",
        TranscriptFormat::Txt,
        "",
    )
    .unwrap();

    assert!(first.equals(&second, true).unwrap());
    assert!(first.equals(&second, false).unwrap());
}

#[test]
fn test_same_speech_in_different_formats_is_loosely_equal_only() {
    let workspace = tempfile::tempdir().unwrap();

    let vtt = TranscriptFile::write(
        workspace.path().join("speech.vtt"),
        VTT_CONTENT,
        TranscriptFormat::Vtt,
        "en",
    )
    .unwrap();
    let srt = TranscriptFile::write(
        workspace.path().join("speech.srt"),
        SRT_CONTENT,
        TranscriptFormat::Srt,
        "en",
    )
    .unwrap();

    assert!(vtt.equals(&srt, false).unwrap());
    assert!(!vtt.equals(&srt, true).unwrap());
}

#[test]
fn test_shifted_cue_timings_are_loosely_equal() {
    let workspace = tempfile::tempdir().unwrap();
    let shifted = VTT_CONTENT.replace("00:02.000", "00:02.040");

    let original = TranscriptFile::write(
        workspace.path().join("a.vtt"),
        VTT_CONTENT,
        TranscriptFormat::Vtt,
        "en",
    )
    .unwrap();
    let retimed = TranscriptFile::write(
        workspace.path().join("b.vtt"),
        &shifted,
        TranscriptFormat::Vtt,
        "en",
    )
    .unwrap();

    assert!(original.equals(&retimed, false).unwrap());
    assert!(!original.equals(&retimed, true).unwrap());
}

#[test]
fn test_evaluate_scores_identical_speech_as_zero_across_formats() {
    let workspace = tempfile::tempdir().unwrap();

    let reference = TranscriptFile::write(
        workspace.path().join("reference.vtt"),
        VTT_CONTENT,
        TranscriptFormat::Vtt,
        "en",
    )
    .unwrap();
    let hypothesis = TranscriptFile::write(
        workspace.path().join("hypothesis.srt"),
        SRT_CONTENT,
        TranscriptFormat::Srt,
        "en",
    )
    .unwrap();

    let result = reference.evaluate(&hypothesis).unwrap();

    assert_eq!(result.wer, 0.0);
    assert_eq!(result.cer, 0.0);
}

#[test]
fn test_evaluate_counts_an_extra_word_as_one_over_reference_length() {
    let workspace = tempfile::tempdir().unwrap();

    let reference = TranscriptFile::write(
        workspace.path().join("reference.txt"),
        "may i help you please\n",
        TranscriptFormat::Txt,
        "en",
    )
    .unwrap();
    let hypothesis = TranscriptFile::write(
        workspace.path().join("hypothesis.txt"),
        "may i really help you please\n",
        TranscriptFormat::Txt,
        "en",
    )
    .unwrap();

    let result = reference.evaluate(&hypothesis).unwrap();

    // Five reference words, one insertion.
    assert_eq!(result.wer, 0.2);
}
