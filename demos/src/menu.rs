/// The demos offered by the interactive binary, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Research,
    Blog,
    Parallel,
    Story,
    Guide,
    Exit,
}

/// Parse a menu selection. Anything outside 1-6 is rejected and the
/// caller re-prompts.
pub fn parse_choice(input: &str) -> Option<Demo> {
    match input.trim() {
        "1" => Some(Demo::Research),
        "2" => Some(Demo::Blog),
        "3" => Some(Demo::Parallel),
        "4" => Some(Demo::Story),
        "5" => Some(Demo::Guide),
        "6" => Some(Demo::Exit),
        _ => None,
    }
}

/// Use the typed topic, or the demo's documented default when the user
/// just presses Enter.
pub fn prompt_or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("  {title}");
    println!("{}", "=".repeat(80));
}

pub fn print_menu() {
    print_header("AGENT ARCHITECTURES INTERACTIVE DEMO");
    println!("Choose a demo to run:");
    println!();
    println!("1. Multi-Agent Research & Summarization System");
    println!("   -> LLM-orchestrated workflow with specialized agents");
    println!();
    println!("2. Sequential Blog Post Creation Pipeline");
    println!("   -> Fixed order: Outline -> Write -> Edit");
    println!();
    println!("3. Parallel Multi-Topic Research");
    println!("   -> Concurrent execution for independent tasks");
    println!();
    println!("4. Loop-based Story Refinement");
    println!("   -> Iterative improvement with feedback cycles");
    println!();
    println!("5. Show Architecture Guide");
    println!("6. Exit");
    println!();
}

pub fn print_architecture_guide() {
    print_header("AGENT ARCHITECTURE DECISION GUIDE");

    println!("Choose the right pattern for your use case:");

    println!("\nLLM-ORCHESTRATED (Demo 1)");
    println!("   When: Dynamic decisions needed, flexible workflow");
    println!("   Example: Research + Summarize based on content");
    println!("   Best for: Content-dependent workflows, adaptive responses");
    println!("   Pros: Flexible, adaptive, intelligent routing");
    println!("   Cons: Less predictable, harder to debug");

    println!("\nSEQUENTIAL (Demo 2)");
    println!("   When: Order matters, linear pipeline, each step builds on previous");
    println!("   Example: Outline -> Write -> Edit");
    println!("   Best for: Assembly-line processes, dependent steps");
    println!("   Pros: Predictable, deterministic, easy to debug");
    println!("   Cons: Slower (sequential), rigid structure");

    println!("\nPARALLEL (Demo 3)");
    println!("   When: Independent tasks, speed matters, no dependencies");
    println!("   Example: Research multiple topics simultaneously");
    println!("   Best for: Independent research, data gathering, concurrent tasks");
    println!("   Pros: Fast, efficient, scalable");
    println!("   Cons: Requires independent tasks, complex coordination");

    println!("\nLOOP (Demo 4)");
    println!("   When: Iterative improvement needed, quality refinement");
    println!("   Example: Write -> Critique -> Improve -> Repeat");
    println!("   Best for: Quality control, iterative refinement, self-improvement");
    println!("   Pros: High quality output, self-improving, thorough");
    println!("   Cons: Slower, can be unpredictable, may not converge");

    println!("\nQUICK DECISION FLOWCHART:");
    println!("Do tasks depend on each other?");
    println!("   YES -> Do they need to run in specific order?");
    println!("       YES -> Use SEQUENTIAL");
    println!("       NO  -> Use LLM-ORCHESTRATED");
    println!("   NO  -> Do you need quality refinement?");
    println!("       YES -> Use LOOP");
    println!("       NO  -> Use PARALLEL");
}
