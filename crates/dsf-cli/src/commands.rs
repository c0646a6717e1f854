use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use dsf_cli::render::{
    disease_table, extraction_table, hierarchy_table, keyword_table, notice_line,
    organization_table, pending_table, stats_table, status_line, workspace_table,
};
use dsf_cli::session::{SessionCommand, parse_line};
use dsf_client::{ApiClient, ClientConfig, UploadFile};
use dsf_model::{
    DiseaseRecord, ExtractionRequest, NewKeyword, SearchSettings, VerificationRequest,
};
use dsf_workspace::{
    DiseaseDetail, PartialFailure, SaveOutcome, TableView, Workspace, WorkspaceController,
    WorkspaceError, export_file_name, load_disease_detail, load_search_overview,
};

use crate::cli::{
    Cli, Command, DiseasesCommand, KeywordsCommand, LlmCommand, NandoCommand, SearchCommand,
    SearchRunArgs, VerifyArgs, WorkspaceArgs,
};

/// Resolve the client configuration: defaults, then the config file, then flags.
pub fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config =
        ClientConfig::discover(cli.config.as_deref()).context("load client config")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    Ok(config.with_timeout_secs(cli.timeout))
}

pub async fn run(cli: &Cli) -> Result<()> {
    let config = client_config(cli)?;
    let client = ApiClient::new(&config).context("create API client")?;
    info!("Using API at {}", client.base_url());

    match &cli.command {
        Command::Workspace(args) => run_workspace(client, args).await,
        Command::Diseases(command) => run_diseases(&client, command).await,
        Command::Keywords(command) => run_keywords(&client, command).await,
        Command::Nando(command) => run_nando(&client, command).await,
        Command::Search(command) => run_search(&client, command).await,
        Command::Verify(args) => run_verify(&client, args).await,
        Command::Llm(command) => run_llm(&client, command).await,
    }
}

/// Export file names carry the UTC calendar date.
fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Records matching the catalog filter, in server order.
fn catalog_matches(records: &[DiseaseRecord], filter: Option<&str>) -> Vec<DiseaseRecord> {
    let needle = filter.unwrap_or_default().to_lowercase();
    records
        .iter()
        .filter(|record| record.matches_catalog_lowercase(&needle))
        .cloned()
        .collect()
}

fn current_dir_or(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn print_warnings(warnings: &[PartialFailure]) {
    for warning in warnings {
        eprintln!("warning: could not load {}: {}", warning.part, warning.message);
    }
}

// =========================================================================
// Interactive workspace
// =========================================================================

enum Flow {
    Continue,
    Quit,
}

async fn run_workspace(client: ApiClient, args: &WorkspaceArgs) -> Result<()> {
    let export_dir = current_dir_or(args.export_dir.as_deref());
    let workspace = Workspace::with_view(TableView::with_rows_per_page(args.rows_per_page));
    let mut controller = WorkspaceController::with_workspace(client, workspace);

    if let Err(error) = controller.load().await {
        warn!("Initial load failed: {error}");
    }
    show_page(controller.workspace());
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("dsf> ");
        io::stdout().flush().context("flush prompt")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("read command")? == 0 {
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                let _ = error.print();
                continue;
            }
        };

        match execute(&mut controller, command, &export_dir).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => eprintln!("error: {}", error.user_message()),
        }
    }

    let pending = controller.workspace().pending_count();
    if pending > 0 {
        eprintln!("warning: leaving with {pending} unsaved changes");
    }
    Ok(())
}

async fn execute(
    controller: &mut WorkspaceController<ApiClient>,
    command: SessionCommand,
    export_dir: &Path,
) -> Result<Flow, WorkspaceError> {
    match command {
        SessionCommand::Show => {}
        SessionCommand::Toggle { disease_ids } => {
            for id in &disease_ids {
                let value = controller.toggle(id)?;
                println!("{id}: searchable = {value}");
            }
        }
        SessionCommand::Group { prefix, state } => {
            let affected = controller.group_toggle(&prefix, state.is_on())?;
            println!(
                "{affected} diseases in NANDO:{prefix} set to searchable = {}",
                state.is_on()
            );
        }
        SessionCommand::Filter { text } => {
            controller.workspace_mut().view_mut().set_filter(text.join(" "));
        }
        SessionCommand::Page { number } => {
            controller
                .workspace_mut()
                .view_mut()
                .go_to_page(number.saturating_sub(1));
        }
        SessionCommand::Next => controller.workspace_mut().view_mut().next_page(),
        SessionCommand::Prev => controller.workspace_mut().view_mut().previous_page(),
        SessionCommand::Rows { count } => {
            controller.workspace_mut().view_mut().set_rows_per_page(count);
        }
        SessionCommand::Pending => {
            let workspace = controller.workspace();
            if workspace.queue().is_empty() {
                println!("No pending changes.");
            } else {
                println!("{}", pending_table(workspace.queue(), workspace));
            }
            return Ok(Flow::Continue);
        }
        SessionCommand::Save => {
            if controller.save().await? == SaveOutcome::NothingToSave {
                println!("Nothing to save.");
            }
        }
        SessionCommand::Reload => {
            controller.load().await?;
        }
        SessionCommand::Discard => {
            let discarded = controller.discard_changes().await?;
            println!("Discarded {discarded} pending changes.");
        }
        SessionCommand::Export { dir } => {
            let dir = dir.unwrap_or_else(|| export_dir.to_path_buf());
            controller.export_to(&dir, today()).await?;
        }
        SessionCommand::Import { path } => {
            let file = UploadFile::from_path(&path)?;
            controller.import(file).await?;
        }
        SessionCommand::Dismiss => controller.workspace_mut().dismiss_notice(),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    show_page(controller.workspace());
    Ok(Flow::Continue)
}

fn show_page(workspace: &Workspace) {
    let page = workspace.page();
    println!("{}", workspace_table(workspace, &page));
    println!("{}", status_line(workspace, &page));
    if let Some(notice) = workspace.notice() {
        println!("{}", notice_line(notice));
    }
}

// =========================================================================
// One-shot commands
// =========================================================================

async fn run_diseases(client: &ApiClient, command: &DiseasesCommand) -> Result<()> {
    match command {
        DiseasesCommand::List { searchable, filter } => {
            let records = if *searchable {
                client.list_searchable().await
            } else {
                client.list_diseases().await
            }
            .context("list diseases")?;

            let matching = catalog_matches(&records, filter.as_deref());
            println!("{}", disease_table(&matching));
            println!("{} of {} diseases", matching.len(), records.len());
        }
        DiseasesCommand::Show { disease_id } => {
            let detail = load_disease_detail(client, disease_id)
                .await
                .with_context(|| format!("load disease {disease_id}"))?;
            print_detail(&detail);
        }
        DiseasesCommand::Search { query } => {
            let records = client
                .search_diseases(query)
                .await
                .with_context(|| format!("search diseases for {query:?}"))?;
            println!("{}", disease_table(&records));
        }
        DiseasesCommand::Stats => {
            let stats = client.hierarchy_stats().await.context("load hierarchy stats")?;
            println!("{}", stats_table(&stats));
        }
        DiseasesCommand::Export { output_dir } => {
            let bytes = client
                .export_searchable()
                .await
                .context("export searchable diseases")?;
            let path = current_dir_or(output_dir.as_deref()).join(export_file_name(today()));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        DiseasesCommand::Import { path } => {
            let file = UploadFile::from_path(path)?;
            let ack = client
                .import_searchable(file)
                .await
                .with_context(|| format!("import {}", path.display()))?;
            println!("{}", ack.message);
        }
        DiseasesCommand::SetSearchable { disease_id, state } => {
            let record = client
                .update_searchable(disease_id, state.is_on())
                .await
                .with_context(|| format!("update {disease_id}"))?;
            println!("{}: searchable = {}", record.name, record.is_searchable);
        }
    }
    Ok(())
}

fn print_detail(detail: &DiseaseDetail) {
    let disease = &detail.disease;
    println!("{} ({})", disease.name, disease.id);
    let fields = [
        ("English name", disease.name_en.as_deref()),
        ("Kana", disease.name_kana.as_deref()),
        ("NANDO ID", disease.nando_id.as_deref()),
        ("Type", disease.disease_type.as_deref()),
        ("Overview", disease.overview.as_deref()),
        ("Characteristics", disease.characteristics.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }
    if let Some(count) = disease.patient_count {
        println!("  Patients: {count}");
    }
    println!("  Searchable: {}", disease.is_searchable);

    if let Some(hierarchy) = &detail.hierarchy {
        if let Some(parent) = &hierarchy.parent {
            println!("  Parent: {} ({})", parent.name, parent.id);
        }
        for child in &hierarchy.children {
            println!("  Child: {} ({})", child.name, child.id);
        }
    }

    if detail.keywords.is_empty() {
        println!("No custom keywords.");
    } else {
        println!("{}", keyword_table(&detail.keywords));
    }
    print_warnings(&detail.warnings);
}

async fn run_keywords(client: &ApiClient, command: &KeywordsCommand) -> Result<()> {
    match command {
        KeywordsCommand::List { disease_id } => {
            let keywords = client
                .list_keywords(disease_id)
                .await
                .with_context(|| format!("list keywords of {disease_id}"))?;
            println!("{}", keyword_table(&keywords));
        }
        KeywordsCommand::Add {
            disease_id,
            keyword,
            keyword_type,
        } => {
            let mut detail = load_disease_detail(client, disease_id)
                .await
                .with_context(|| format!("load disease {disease_id}"))?;
            let added = detail
                .add_keyword(client, &NewKeyword::manual(keyword.clone(), *keyword_type))
                .await
                .context("add keyword")?;
            println!("Added keyword {} ({})", added.keyword, added.id);
            println!("{}", keyword_table(&detail.keywords));
            print_warnings(&detail.warnings);
        }
        KeywordsCommand::Delete {
            disease_id,
            keyword_id,
        } => {
            let mut detail = load_disease_detail(client, disease_id)
                .await
                .with_context(|| format!("load disease {disease_id}"))?;
            detail
                .delete_keyword(client, *keyword_id)
                .await
                .with_context(|| format!("delete keyword {keyword_id}"))?;
            println!("{}", keyword_table(&detail.keywords));
            print_warnings(&detail.warnings);
        }
        KeywordsCommand::Import { path } => {
            let file = UploadFile::from_path(path)?;
            let ack = client
                .import_keywords(file)
                .await
                .with_context(|| format!("import {}", path.display()))?;
            println!("{}", ack.message);
        }
    }
    Ok(())
}

async fn run_nando(client: &ApiClient, command: &NandoCommand) -> Result<()> {
    match command {
        NandoCommand::Import { path, custom } => {
            let file = UploadFile::from_path(path)?;
            let outcome = if *custom {
                client.import_custom_diseases(file).await
            } else {
                client.import_nando(file).await
            }
            .with_context(|| format!("import {}", path.display()))?;

            println!("{}", outcome.message);
            println!("Imported: {}", outcome.imported);
            if let Some(skipped) = outcome.skipped {
                println!("Skipped: {skipped}");
            }
            for error in outcome.errors.iter().flatten() {
                eprintln!("warning: {error}");
            }
        }
        NandoCommand::Hierarchy { parent } => {
            let hierarchy = client.nando_hierarchy().await.context("load NANDO hierarchy")?;
            println!("{}", hierarchy_table(&hierarchy, parent.as_deref()));
        }
        NandoCommand::Search => {
            let ack = client
                .run_comprehensive_search()
                .await
                .context("start comprehensive search")?;
            println!("{}", ack.message);
        }
    }
    Ok(())
}

async fn run_search(client: &ApiClient, command: &SearchCommand) -> Result<()> {
    match command {
        SearchCommand::Run(args) => run_disease_search(client, args).await,
        SearchCommand::Terms { disease_id } => {
            let terms = client
                .search_terms(disease_id)
                .await
                .with_context(|| format!("load search terms of {disease_id}"))?;
            for term in &terms.search_terms {
                println!("{term}");
            }
            Ok(())
        }
    }
}

async fn run_disease_search(client: &ApiClient, args: &SearchRunArgs) -> Result<()> {
    let overview = load_search_overview(client, &args.disease_id)
        .await
        .with_context(|| format!("load disease {}", args.disease_id))?;
    println!("{} ({})", overview.disease.name, overview.disease.id);
    if !overview.search_terms.is_empty() {
        println!("Search terms: {}", overview.search_terms.join(", "));
    }
    print_warnings(&overview.warnings);

    let settings = SearchSettings {
        enable_approximate_match: !args.no_approximate,
        enable_two_stage_verification: !args.no_two_stage,
        require_human_verification: args.human_verification,
        max_tokens: args.max_tokens,
    };
    let result = client
        .search_disease(&args.disease_id, &settings)
        .await
        .context("run organization search")?;

    if result.organizations.is_empty() {
        println!("No organizations found.");
    } else {
        println!("{}", organization_table(&result.organizations));
    }
    Ok(())
}

async fn run_verify(client: &ApiClient, args: &VerifyArgs) -> Result<()> {
    let request = VerificationRequest {
        status: args.status,
        reason: args.reason.clone(),
    };
    let ack = client
        .verify_organization(&args.organization_id, &request)
        .await
        .with_context(|| format!("verify organization {}", args.organization_id))?;
    if ack.message.is_empty() {
        println!("{} marked {}", args.organization_id, args.status);
    } else {
        println!("{}", ack.message);
    }
    Ok(())
}

async fn run_llm(client: &ApiClient, command: &LlmCommand) -> Result<()> {
    match command {
        LlmCommand::Health => {
            let health = client.llm_health().await.context("check extraction model")?;
            if health.is_healthy() {
                println!("Extraction model: healthy");
            } else {
                println!("Extraction model: unreachable");
            }
        }
        LlmCommand::Models => {
            let models = client.llm_models().await.context("list extraction models")?;
            if models.is_empty() {
                println!("No models available.");
            }
            for model in models {
                println!("{model}");
            }
        }
        LlmCommand::Test { text, disease_name } => {
            if text.trim().is_empty() || disease_name.trim().is_empty() {
                anyhow::bail!("both text and --disease must be non-empty");
            }
            let result = client
                .test_extraction(&ExtractionRequest::new(text.clone(), disease_name.clone()))
                .await
                .with_context(|| format!("test extraction for {disease_name}"))?;
            if result.organizations.is_empty() {
                println!("No organizations extracted.");
            } else {
                println!("{}", extraction_table(&result.organizations));
            }
        }
    }
    Ok(())
}
