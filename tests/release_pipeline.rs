//! End to end: release document on disk → mapped album → planned names.

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use discogs_tagger::config::FileFormatting;
use discogs_tagger::mapping::classify;
use discogs_tagger::source::discover_jobs;
use discogs_tagger::{map_release, plan_release, JsonDirectorySource, MappingError, ReleaseSource};

fn write_release(dir: &Path, id: &str, value: serde_json::Value) {
    fs::write(dir.join(format!("{}.json", id)), value.to_string()).unwrap();
}

fn megahits() -> serde_json::Value {
    json!({
        "id": 1448190,
        "title": "Megahits 2001 Die Erste",
        "artists": [{"name": "Various", "join": ""}],
        "labels": [{"name": "Polystar", "catno": "560 938-2"}],
        "year": 2001,
        "formats": [{"name": "CD", "qty": "2", "descriptions": ["Compilation"]}],
        "genres": ["Electronic", "Hip Hop"],
        "styles": ["Euro House"],
        "country": "Germany",
        "tracklist": [
            {"position": "", "title": "CD 1", "duration": ""},
            {"position": "1-01", "title": "La Passion (Radio Cut)", "duration": "3:47",
             "artists": [{"name": "Gigi D'Agostino", "join": ""}]},
            {"position": "1-02", "title": "Liebe Auf Den Ersten Blick", "duration": "3:47",
             "artists": [{"name": "Absolute Beginner", "join": "Feat."}, {"name": "Eißfeldt (2)", "join": ""}]},
            {"position": "Video", "title": "Making Of", "duration": "5:00"},
            {"position": "", "title": "CD 2", "duration": ""},
            {"position": "2-01", "title": "Ich Will, Dass Du Mich Liebst (Radio Edit)", "duration": "3:30",
             "artists": [{"name": "Die Prinzen", "join": ""}]},
            {"position": "2-20", "title": "I Just Wanna Love U (Give It 2 Me) (Radio Edit)", "duration": "3:40",
             "artists": [{"name": "Jay-Z", "join": ""}]}
        ]
    })
}

#[test]
fn test_megahits_pipeline() {
    let dir = TempDir::new().unwrap();
    write_release(dir.path(), "1448190", megahits());

    let source = JsonDirectorySource::new(dir.path());
    let raw = source.fetch_release("1448190").unwrap();
    let album = map_release(&raw).unwrap();

    assert!(album.is_compilation);
    assert_eq!(album.disctotal, 2);
    assert_eq!(album.year, "2001");
    assert_eq!(album.url(), "http://www.discogs.com/release/1448190");

    // Every entry is either a track or a skipped heading/video item
    let skipped = raw.tracklist.iter().filter(|t| !classify(t).is_track()).count();
    assert_eq!(skipped, 3);
    assert_eq!(album.track_count() + skipped, raw.tracklist.len());

    // Disc numbers run 1..=disctotal
    let numbers: Vec<u32> = album.discs.iter().map(|d| d.discnumber).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(album.discs[0].discsubtitle.as_deref(), Some("CD 1"));
    assert_eq!(album.discs[1].discsubtitle.as_deref(), Some("CD 2"));

    let plan = plan_release(&album, &FileFormatting::default(), Path::new("./dest"), ".mp3").unwrap();
    assert_eq!(
        plan.directory,
        PathBuf::from("dest/various-megahits_2001_die_erste-(560_938-2)-2001")
    );
    let names: Vec<&str> = plan.tracks.iter().map(|t| t.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "01-gigi_dagostino-la_passion_(radio_cut).mp3",
            "02-absolute_beginner_feat_eissfeldt-liebe_auf_den_ersten_blick.mp3",
            "01-die_prinzen-ich_will_dass_du_mich_liebst_(radio_edit).mp3",
            "20-jay-z-i_just_wanna_love_u_(give_it_2_me)_(radio_edit).mp3",
        ]
    );
    assert_eq!(plan.playlist, "00-various-megahits_2001_die_erste.m3u");
}

#[test]
fn test_digital_release_is_single_disc() {
    let dir = TempDir::new().unwrap();
    write_release(
        dir.path(),
        "42",
        json!({
            "id": "42",
            "title": "Digital",
            "artists": [{"name": "Artist"}],
            "formats": [{"name": "File", "qty": "3"}],
            "tracklist": [
                {"position": "1", "title": "One", "duration": "1:00"},
                {"position": "2", "title": "Two", "duration": "1:00"}
            ]
        }),
    );

    let album = map_release(&JsonDirectorySource::new(dir.path()).fetch_release("42").unwrap()).unwrap();
    assert_eq!(album.disctotal, 1);
    assert_eq!(album.discs.len(), 1);
    assert_eq!(album.track_count(), 2);
}

#[test]
fn test_vinyl_positions_fail_whole_release() {
    let dir = TempDir::new().unwrap();
    write_release(
        dir.path(),
        "7",
        json!({
            "id": 7,
            "title": "Vinyl",
            "artists": [{"name": "Artist"}],
            "formats": [{"name": "Vinyl", "qty": "1"}],
            "tracklist": [{"position": "A1", "title": "Side A", "duration": "4:00"}]
        }),
    );

    let raw = JsonDirectorySource::new(dir.path()).fetch_release("7").unwrap();
    let err = map_release(&raw).unwrap_err();
    assert!(matches!(err, MappingError::Position { .. }));
    assert_eq!(err.release_id(), "7");
}

#[test]
fn test_jobs_from_id_files() {
    let root = TempDir::new().unwrap();
    let album_dir = root.path().join("Megahits");
    fs::create_dir_all(&album_dir).unwrap();
    fs::write(album_dir.join("id.txt"), "1448190\n").unwrap();
    write_release(root.path(), "1448190", megahits());

    let jobs = discover_jobs(root.path(), "id.txt", true);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].source_dir.as_deref(), Some(album_dir.as_path()));

    let source = JsonDirectorySource::new(root.path());
    let album = map_release(&source.fetch_release(&jobs[0].release_id).unwrap()).unwrap();
    assert_eq!(album.id, "1448190");
}
