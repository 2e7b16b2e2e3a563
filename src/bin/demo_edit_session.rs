// Quick demonstration of the editing core and its undo history
// Run with: cargo run --bin demo_edit_session
// Set RUST_LOG=clipforge=debug to watch history events

use clipforge::command::{
    AddClipCommand, AddTrackCommand, MacroCommand, MoveClipCommand, TrimClipCommand,
};
use clipforge::media::{AudioInfo, MediaError, MediaInfo, MediaProbe, VideoInfo, import_asset};
use clipforge::{EditorConfig, Project, validate_project};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Pretends every .mp4 is 8 s of 1080p video and every .wav is 20 s of audio
struct StubProbe;

impl MediaProbe for StubProbe {
    fn probe(&self, path: &Path) -> Result<MediaInfo, MediaError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("mp4") => Ok(MediaInfo {
                duration_ms: Some(8_000),
                video: Some(VideoInfo {
                    width: 1920,
                    height: 1080,
                    fps: 30.0,
                }),
                audio: Some(AudioInfo {
                    sample_rate: 48_000,
                    channels: 2,
                }),
            }),
            Some("wav") => Ok(MediaInfo {
                duration_ms: Some(20_000),
                video: None,
                audio: Some(AudioInfo {
                    sample_rate: 48_000,
                    channels: 2,
                }),
            }),
            _ => Err(MediaError::ProbeFailed {
                path: path.display().to_string(),
                reason: "no stub data".to_string(),
            }),
        }
    }
}

fn print_history(project: &Project) {
    let Some(stack) = project.undo_stack() else {
        println!("   - History: (not created yet)");
        return;
    };
    println!(
        "   - History: {} undo / {} redo",
        stack.undo_count(),
        stack.redo_count()
    );
    for description in stack.history_descriptions() {
        println!("       · {}", description);
    }
}

fn print_timeline(project: &Project) {
    for track in project.timeline().tracks() {
        println!("   Track {} ({}):", track.index(), track.name);
        for clip in track.clips() {
            println!(
                "       [{:>6} ms .. {:>6} ms] {} (in {} ms)",
                clip.start_ms(),
                clip.end_ms(),
                clip.asset().display_name(),
                clip.in_point_ms()
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🎬 Clipforge - Edit Session Demo");
    println!("================================");

    let config = match EditorConfig::default_path() {
        Some(path) => EditorConfig::load_or_default(path)?,
        None => EditorConfig::default(),
    };
    let mut project = Project::from_config(&config);
    project.attach_observer(|change| println!("   🔔 {}", change));

    println!(
        "✅ Created project: {} ({}x{}, {:.2}:1 @ {} fps)",
        project.metadata().name,
        project.metadata().width,
        project.metadata().height,
        project.metadata().aspect_ratio(),
        project.metadata().fps
    );

    // Import through the probe; the PNG falls back to the default duration
    let interview = import_asset(&StubProbe, Path::new("/media/interview.mp4"), &config);
    let music = import_asset(&StubProbe, Path::new("/media/music.wav"), &config);
    let title = import_asset(&StubProbe, Path::new("/media/title.png"), &config);
    for asset in [&interview, &music, &title] {
        println!(
            "📥 Imported {} as {} ({} ms)",
            asset.display_name(),
            asset.kind(),
            asset.duration_ms()
        );
    }

    println!("\n✂️  Editing...");
    project.submit(Box::new(AddClipCommand::new(0, interview.clone(), 0)))?;
    let clip_id = project
        .timeline()
        .track(0)?
        .clips()
        .first()
        .map(|clip| clip.id())
        .ok_or("clip was not placed")?;

    // A drag emits many moves; they coalesce into one entry
    for start in [250, 500, 750, 1_000] {
        project.submit(Box::new(MoveClipCommand::new(0, clip_id, start)))?;
    }
    project.submit(Box::new(TrimClipCommand::new(0, clip_id, 1_000, 5_000)))?;

    let music_track = AddTrackCommand::append(&project, "music");
    let music_index = music_track.index();
    let overlay = MacroCommand::with_description(
        "Add Music Bed",
        vec![
            Box::new(music_track),
            Box::new(AddClipCommand::new(music_index, music, 0).with_duration(6_000)),
        ],
    );
    project.submit(Box::new(overlay))?;
    project.submit(Box::new(AddClipCommand::new(0, title, 6_000).with_duration(2_000)))?;

    print_timeline(&project);
    print_history(&project);

    println!("\n↩️  Undo x2");
    for _ in 0..2 {
        if let Some(description) = project.undo()? {
            println!("   Undid: {}", description);
        }
    }
    print_timeline(&project);
    print_history(&project);

    println!("\n↪️  Redo x1");
    if let Some(description) = project.redo()? {
        println!("   Redid: {}", description);
    }
    print_timeline(&project);
    print_history(&project);

    validate_project(&project)?;
    println!("\n✅ Project structure verified");

    Ok(())
}
