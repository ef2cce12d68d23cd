use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{Cli, Command, DraftCommand, ScreenArgs, SkillArgs};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CandidateId, CandidateStatus, SkillSet};
use crate::screening::matcher::percent_label;
use crate::screening::{KeywordMatcher, Thresholds};
use crate::session::store::DraftStore;
use crate::session::{Session, UploadReport};

/// Dispatches one command. Per-candidate failures are printed as status
/// lines inside the handlers; only command-level failures come back here.
pub fn run(cli: Cli, config: &Config) -> Result<(), AppError> {
    let drafts_dir = cli
        .drafts_dir
        .clone()
        .unwrap_or_else(|| config.drafts_dir.clone());
    let store = DraftStore::new(drafts_dir);

    match cli.command {
        Command::Screen(args) => handle_screen(&args, config, &store),
        Command::Draft(DraftCommand::Show { file, skills }) => {
            handle_draft_show(&file, &skills, config, &store)
        }
        Command::Draft(DraftCommand::Save {
            file,
            text,
            from,
            skills,
        }) => handle_draft_save(&file, text, from, &skills, config, &store),
        Command::Draft(DraftCommand::List) => handle_draft_list(&store),
    }
}

/// Builds a session with the configured matcher and skill set; flags win
/// over the environment.
pub fn open_session(config: &Config, args: &SkillArgs) -> Result<Session, AppError> {
    let thresholds = Thresholds::new(
        args.suitable.unwrap_or(config.thresholds.suitable()),
        args.maybe.unwrap_or(config.thresholds.maybe()),
    )?;
    let skills = SkillSet::parse(
        args.skills.as_deref().unwrap_or(&config.required_skills),
        args.critical.as_deref().unwrap_or(&config.critical_skills),
    )?;

    let mut session = Session::new(Box::new(KeywordMatcher::new(thresholds)));
    session.set_skill_set(skills)?;
    Ok(session)
}

fn print_status(err: &AppError) {
    eprintln!("[{}] {}", err.code(), err.user_message());
}

fn print_upload_errors(report: &UploadReport) {
    for err in &report.errors {
        print_status(err);
    }
}

/// screener screen <FILES>...
fn handle_screen(args: &ScreenArgs, config: &Config, store: &DraftStore) -> Result<(), AppError> {
    let mut session = open_session(config, &args.skills)?;
    let report = session.upload(&args.files);
    print_upload_errors(&report);

    println!("{}", render_results(&session));
    let summary = session.summary();
    println!(
        "Suitable: {}  Maybe: {}  Reject: {}  Unscorable: {}",
        summary.suitable, summary.maybe, summary.reject, summary.unscorable
    );

    let scored: Vec<CandidateId> = session
        .candidates()
        .iter()
        .filter(|c| c.match_result().is_some())
        .map(|c| c.id.clone())
        .collect();

    if args.show_drafts {
        for id in &scored {
            match session.draft(id, store) {
                Ok(text) => println!("\n--- {id} ---\n{text}"),
                Err(e) => print_status(&e),
            }
        }
    }

    if args.save_drafts {
        for id in &scored {
            match session.save_draft(id, store) {
                Ok(_) => println!("Saved draft for {id} to {}", store.path_for(id).display()),
                Err(e) => print_status(&e),
            }
        }
    }

    if let Some(export) = &args.export {
        let path = export.clone().unwrap_or_else(|| config.export_path.clone());
        match session.export(&path) {
            Ok(rows) => println!("Exported {rows} rows to {}", path.display()),
            Err(e) => print_status(&e),
        }
    }

    Ok(())
}

/// Uploads a single resume and returns its id, or the error that kept it
/// out of the session.
fn load_single(session: &mut Session, file: &Path) -> Result<CandidateId, AppError> {
    let mut report = session.upload(&[file]);
    let id = CandidateId::from_path(file);
    match session.get(&id).map(|c| &c.status) {
        Some(CandidateStatus::Unscorable { .. }) | None => Err(report
            .errors
            .pop()
            .unwrap_or_else(|| AppError::NotFound(id.to_string()))),
        Some(_) => Ok(id),
    }
}

/// screener draft show <FILE>
fn handle_draft_show(
    file: &Path,
    skills: &SkillArgs,
    config: &Config,
    store: &DraftStore,
) -> Result<(), AppError> {
    let mut session = open_session(config, skills)?;
    let id = load_single(&mut session, file)?;

    if let Some(result) = session.get(&id).and_then(|c| c.match_result()) {
        println!("{id}: {} ({})", result.tier(), result.reason());
    }
    println!("{}", session.draft(&id, store)?);
    Ok(())
}

/// screener draft save <FILE> (--text TEXT | --from PATH)
fn handle_draft_save(
    file: &Path,
    text: Option<String>,
    from: Option<PathBuf>,
    skills: &SkillArgs,
    config: &Config,
    store: &DraftStore,
) -> Result<(), AppError> {
    let reply = match (text, from) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(AppError::Validation(
                "Provide the reply with --text or --from.".to_string(),
            ))
        }
    };

    let mut session = open_session(config, skills)?;
    let id = match load_single(&mut session, file) {
        Ok(id) => id,
        Err(AppError::UnsupportedFormat { path }) => {
            return Err(AppError::UnsupportedFormat { path })
        }
        // An unreadable resume can still carry a hand-written reply.
        Err(e) => {
            print_status(&e);
            CandidateId::from_path(file)
        }
    };

    session.edit_draft(&id, reply)?;
    let record = session.save_draft(&id, store)?;
    info!("Draft for {} saved", record.candidate_file);
    println!("Saved draft for {id} to {}", store.path_for(&id).display());
    Ok(())
}

/// screener draft list
fn handle_draft_list(store: &DraftStore) -> Result<(), AppError> {
    let records = store.list()?;
    if records.is_empty() {
        println!("No drafts found in {}", store.dir().display());
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        let tier = record.tier.map(|t| t.as_str()).unwrap_or("Unscored");
        let ratio = record
            .match_ratio
            .map(percent_label)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{} {} | {} | {} | saved {}\n{}\n",
            i + 1,
            record.candidate_file,
            tier,
            ratio,
            record.saved_at.to_rfc3339(),
            record.reply
        );
    }
    Ok(())
}

/// Fixed-width results table: file, classification, match %, reason.
pub fn render_results(session: &Session) -> String {
    let mut out = format!(
        "{:<32} {:<14} {:>7}  {}",
        "Candidate File", "Classification", "Match %", "Reason"
    );
    for candidate in session.candidates() {
        let (percent, reason) = match &candidate.status {
            CandidateStatus::Scored(result) => (result.percent_label(), result.reason()),
            CandidateStatus::Unscorable { reason } => ("-".to_string(), reason.clone()),
            CandidateStatus::Unscreened => ("-".to_string(), String::new()),
        };
        out.push_str(&format!(
            "\n{:<32} {:<14} {:>7}  {}",
            candidate.id.as_str(),
            candidate.status.label(),
            percent,
            reason
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dir: &Path) -> Config {
        Config {
            required_skills: "python, sql, docker".to_string(),
            critical_skills: "python".to_string(),
            drafts_dir: dir.join("drafts"),
            export_path: dir.join("results.csv"),
            ..Config::default()
        }
    }

    #[test]
    fn test_open_session_prefers_flags_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let args = SkillArgs {
            skills: Some("rust".to_string()),
            critical: Some(String::new()),
            ..SkillArgs::default()
        };

        let session = open_session(&config, &args).unwrap();
        let skills = session.skill_set().unwrap();
        assert_eq!(skills.required(), &["rust"]);
        assert!(skills.critical().is_empty());
    }

    #[test]
    fn test_open_session_rejects_bad_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let args = SkillArgs {
            suitable: Some(0.3),
            maybe: Some(0.6),
            ..SkillArgs::default()
        };
        let err = open_session(&config_for(dir.path()), &args).err().unwrap();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_render_results_lists_each_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let cv = dir.path().join("ana.txt");
        fs::write(&cv, "sql docker").unwrap();
        let mut session = open_session(&config_for(dir.path()), &SkillArgs::default()).unwrap();
        session.upload(&[cv]);

        let table = render_results(&session);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("ana.txt"));
        assert!(lines[1].contains("Reject"));
        assert!(lines[1].contains("Missing critical skills: python"));
    }

    #[test]
    fn test_screen_command_exports_and_saves_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "Python SQL Docker").unwrap();
        fs::write(&b, "Docker").unwrap();

        let cli = Cli {
            drafts_dir: None,
            command: Command::Screen(ScreenArgs {
                files: vec![a, b, dir.path().join("skip.xyz")],
                skills: SkillArgs::default(),
                export: Some(None),
                show_drafts: false,
                save_drafts: true,
            }),
        };
        run(cli, &config).unwrap();

        let csv = fs::read_to_string(&config.export_path).unwrap();
        assert_eq!(csv.lines().count(), 3);
        let store = DraftStore::new(&config.drafts_dir);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_draft_save_then_show_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let cv = dir.path().join("lee.txt");
        fs::write(&cv, "Python SQL").unwrap();

        let save = Cli {
            drafts_dir: None,
            command: Command::Draft(DraftCommand::Save {
                file: cv.clone(),
                text: Some("Hi Lee, let's talk.".to_string()),
                from: None,
                skills: SkillArgs::default(),
            }),
        };
        run(save, &config).unwrap();

        let store = DraftStore::new(&config.drafts_dir);
        let record = store.load(&CandidateId::new("lee.txt")).unwrap().unwrap();
        assert_eq!(record.reply, "Hi Lee, let's talk.");
        assert!(record.tier.is_some());
    }

    #[test]
    fn test_draft_save_rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            drafts_dir: None,
            command: Command::Draft(DraftCommand::Save {
                file: dir.path().join("cv.xyz"),
                text: Some("hello".to_string()),
                from: None,
                skills: SkillArgs::default(),
            }),
        };
        let err = run(cli, &config_for(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat { .. }));
    }
}
