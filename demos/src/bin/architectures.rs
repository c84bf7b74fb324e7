//! Interactive tour of four multi-agent architectures: LLM-orchestrated
//! delegation, a sequential pipeline, parallel fan-out with aggregation,
//! and an iterative critique loop.

use agent_architectures::menu::{self, Demo};
use agent_architectures::{config, credentials, extract, patterns};
use agentlab_core::{Agent, Llm};
use agentlab_runner::{InMemorySessionService, Runner, RunnerConfig};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Starting the agent architectures interactive demo...");

    let api_key = match credentials::resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let model: Arc<dyn Llm> = Arc::new(config::build_model(&api_key)?);

    let mut editor = DefaultEditor::new()?;
    loop {
        menu::print_menu();
        let choice = match editor.readline("Select an option (1-6): ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let Some(demo) = menu::parse_choice(&choice) else {
            println!("Invalid choice. Please select 1-6.");
            continue;
        };

        let result = match demo {
            Demo::Research => demo_research(&mut editor, model.clone()).await,
            Demo::Blog => demo_blog(&mut editor, model.clone()).await,
            Demo::Parallel => demo_parallel(model.clone()).await,
            Demo::Story => demo_story(&mut editor, model.clone()).await,
            Demo::Guide => {
                menu::print_architecture_guide();
                Ok(())
            }
            Demo::Exit => {
                println!("\nThanks for exploring agent architectures!");
                break;
            }
        };

        if let Err(e) = result {
            println!("\nError running demo: {e}");
        }
        pause(&mut editor);
    }

    Ok(())
}

fn read_topic(editor: &mut DefaultEditor, prompt: &str, default: &str) -> String {
    let input = editor.readline(prompt).unwrap_or_default();
    menu::prompt_or_default(&input, default)
}

fn pause(editor: &mut DefaultEditor) {
    let _ = editor.readline("\nPress Enter to return to the main menu...");
}

async fn run_and_extract(root: Arc<dyn Agent>, prompt: &str) -> Result<String> {
    let session_service = Arc::new(InMemorySessionService::new());
    let runner = Runner::new(RunnerConfig {
        app_name: "architectures".into(),
        agent: root,
        session_service: session_service.clone(),
    });
    let session = session_service.create_session("architectures", "user");
    let events = runner.run_collect("user", session.id(), prompt).await?;
    Ok(extract::response_text(&events))
}

async fn demo_research(editor: &mut DefaultEditor, model: Arc<dyn Llm>) -> Result<()> {
    menu::print_header("DEMO 1: Multi-Agent Research & Summarization System");
    println!("This demo creates a system with specialized agents:");
    println!("  - Research Agent: Searches for information using Google Search");
    println!("  - Summarizer Agent: Creates concise summaries from research findings");
    println!("  - Root Coordinator: Orchestrates the workflow");

    let root = patterns::research_system(model)?;
    println!("\nAgents created.");

    let topic = read_topic(
        editor,
        "\nEnter a topic to research (or press Enter for default): ",
        "latest advancements in quantum computing and what they mean for AI",
    );
    println!("\nResearching: {topic}");

    let summary = run_and_extract(root, &topic).await?;
    println!("\nFinal Summary:\n{summary}");
    Ok(())
}

async fn demo_blog(editor: &mut DefaultEditor, model: Arc<dyn Llm>) -> Result<()> {
    menu::print_header("DEMO 2: Sequential Blog Post Creation Pipeline");
    println!("This demo creates a blog post creation pipeline:");
    println!("  - Outline Agent: Creates a blog outline");
    println!("  - Writer Agent: Writes the blog post");
    println!("  - Editor Agent: Edits and polishes the draft");

    let root = patterns::blog_pipeline(model)?;
    println!("\nSequential pipeline created.");

    let topic = read_topic(
        editor,
        "\nEnter a blog topic (or press Enter for default): ",
        "benefits of multi-agent systems for software developers",
    );
    println!("\nCreating blog post about: {topic}");

    let post = run_and_extract(root, &format!("Write a blog post about {topic}")).await?;
    println!("\nFinal Blog Post:\n{post}");
    Ok(())
}

async fn demo_parallel(model: Arc<dyn Llm>) -> Result<()> {
    menu::print_header("DEMO 3: Parallel Multi-Topic Research");
    println!("This demo runs multiple research agents in parallel:");
    println!("  - Tech Researcher: AI/ML trends");
    println!("  - Health Researcher: Medical breakthroughs");
    println!("  - Finance Researcher: Fintech trends");
    println!("  - Aggregator Agent: Combines all findings");

    let root = patterns::parallel_research(model)?;
    println!("\nParallel research system created.");
    println!("\nRunning parallel research on Tech, Health, and Finance...");

    let summary = run_and_extract(
        root,
        "Run the daily executive briefing on Tech, Health, and Finance",
    )
    .await?;
    println!("\nExecutive Summary:\n{summary}");
    Ok(())
}

async fn demo_story(editor: &mut DefaultEditor, model: Arc<dyn Llm>) -> Result<()> {
    menu::print_header("DEMO 4: Loop-based Story Refinement");
    println!("This demo creates an iterative story refinement system:");
    println!("  - Initial Writer Agent: Creates first draft");
    println!("  - Critic Agent: Reviews and provides feedback");
    println!("  - Refiner Agent: Improves the story or signals completion");

    let root = patterns::story_refinement(model)?;
    println!("\nStory refinement system created.");

    let prompt = read_topic(
        editor,
        "\nEnter a story prompt (or press Enter for default): ",
        "a lighthouse keeper who discovers a mysterious, glowing map",
    );
    println!("\nWriting story about: {prompt}");

    let session_service = Arc::new(InMemorySessionService::new());
    let runner = Runner::new(RunnerConfig {
        app_name: "architectures".into(),
        agent: root,
        session_service: session_service.clone(),
    });
    let session = session_service.create_session("architectures", "user");
    let events = runner
        .run_collect(
            "user",
            session.id(),
            &format!("Write a short story about {prompt}"),
        )
        .await?;

    let story = extract::story_text(&events);
    println!("\nFinal Story:\n{story}");
    if story == extract::NO_TEXT_FALLBACK {
        println!("\nStory refinement completed! The loop exited after approval.");
    } else {
        println!("\nStory refinement completed successfully!");
    }
    Ok(())
}
