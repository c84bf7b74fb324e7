//! Wiring for the four multi-agent architecture patterns. Each builder
//! takes a shared model handle and returns the root agent for that demo.

use agentlab_agent::{LlmAgent, LoopAgent, ParallelAgent, SequentialAgent};
use agentlab_core::{Agent, Llm, Result};
use agentlab_tool::{AgentTool, ExitLoopTool, GoogleSearchTool};
use std::sync::Arc;

/// Demo 1: a coordinator model that delegates to a research agent and a
/// summarizer agent, both exposed as callable tools.
pub fn research_system(model: Arc<dyn Llm>) -> Result<Arc<dyn Agent>> {
    let research_agent = Arc::new(
        LlmAgent::builder("ResearchAgent")
            .description("Finds relevant information on a topic using Google Search.")
            .model(model.clone())
            .instruction(
                "You are a specialized research agent. Your only job is to use the \
                 google_search tool to find 2-3 pieces of relevant information on the \
                 given topic and present the findings with citations.",
            )
            .tool(Arc::new(GoogleSearchTool::new()))
            .output_key("research_findings")
            .build()?,
    );

    let summarizer_agent = Arc::new(
        LlmAgent::builder("SummarizerAgent")
            .description("Creates concise summaries from research findings.")
            .model(model.clone())
            .instruction(
                "Read the provided research findings: {research_findings}\n\
                 Create a concise summary as a bulleted list with 3-5 key points.",
            )
            .output_key("final_summary")
            .build()?,
    );

    let coordinator = LlmAgent::builder("ResearchCoordinator")
        .description("Orchestrates the research and summarization workflow.")
        .model(model)
        .instruction(
            "You are a research coordinator. Your goal is to answer the user's query by \
             orchestrating a workflow.\n\
             1. First, you MUST call the `ResearchAgent` tool to find relevant information \
             on the topic provided by the user.\n\
             2. Next, after receiving the research findings, you MUST call the \
             `SummarizerAgent` tool to create a concise summary.\n\
             3. Finally, present the final summary clearly to the user as your response.",
        )
        .tool(Arc::new(AgentTool::new(research_agent)))
        .tool(Arc::new(AgentTool::new(summarizer_agent)))
        .build()?;

    Ok(Arc::new(coordinator))
}

/// Demo 2: a fixed-order pipeline. Each stage's output lands in session
/// state and feeds the next stage's instruction template.
pub fn blog_pipeline(model: Arc<dyn Llm>) -> Result<Arc<dyn Agent>> {
    let outline_agent = Arc::new(
        LlmAgent::builder("OutlineAgent")
            .model(model.clone())
            .instruction(
                "Create a blog outline for the given topic with:\n\
                 1. A catchy headline\n\
                 2. An introduction hook\n\
                 3. 3-5 main sections with 2-3 bullet points for each\n\
                 4. A concluding thought",
            )
            .output_key("blog_outline")
            .build()?,
    );

    let writer_agent = Arc::new(
        LlmAgent::builder("WriterAgent")
            .model(model.clone())
            .instruction(
                "Following this outline strictly: {blog_outline}\n\
                 Write a brief, 200 to 300-word blog post with an engaging and \
                 informative tone.",
            )
            .output_key("blog_draft")
            .build()?,
    );

    let editor_agent = Arc::new(
        LlmAgent::builder("EditorAgent")
            .model(model)
            .instruction(
                "Edit this draft: {blog_draft}\n\
                 Your task is to polish the text by fixing any grammatical errors, \
                 improving the flow and sentence structure, and enhancing overall clarity.",
            )
            .output_key("final_blog")
            .build()?,
    );

    Ok(Arc::new(SequentialAgent::new(
        "BlogPipeline",
        vec![outline_agent, writer_agent, editor_agent],
    )))
}

/// Demo 3: three researchers fan out concurrently, then an aggregator
/// combines their state writes into one executive summary.
pub fn parallel_research(model: Arc<dyn Llm>) -> Result<Arc<dyn Agent>> {
    let tech_researcher = Arc::new(
        LlmAgent::builder("TechResearcher")
            .model(model.clone())
            .instruction(
                "Research the latest AI/ML trends. Include 3 key developments,\n\
                 the main companies involved, and the potential impact. Keep the report \
                 very concise (100 words).",
            )
            .tool(Arc::new(GoogleSearchTool::new()))
            .output_key("tech_research")
            .build()?,
    );

    let health_researcher = Arc::new(
        LlmAgent::builder("HealthResearcher")
            .model(model.clone())
            .instruction(
                "Research recent medical breakthroughs. Include 3 significant advances,\n\
                 their practical applications, and estimated timelines. Keep the report \
                 concise (100 words).",
            )
            .tool(Arc::new(GoogleSearchTool::new()))
            .output_key("health_research")
            .build()?,
    );

    let finance_researcher = Arc::new(
        LlmAgent::builder("FinanceResearcher")
            .model(model.clone())
            .instruction(
                "Research current fintech trends. Include 3 key trends,\n\
                 their market implications, and the future outlook. Keep the report \
                 concise (100 words).",
            )
            .tool(Arc::new(GoogleSearchTool::new()))
            .output_key("finance_research")
            .build()?,
    );

    let aggregator_agent = Arc::new(
        LlmAgent::builder("AggregatorAgent")
            .model(model)
            .instruction(
                "Combine these three research findings into a single executive summary:\n\n\
                 **Technology Trends:**\n{tech_research}\n\n\
                 **Health Breakthroughs:**\n{health_research}\n\n\
                 **Finance Innovations:**\n{finance_research}\n\n\
                 Your summary should highlight common themes, surprising connections, and \
                 the most important key takeaways from all three reports. The final \
                 summary should be around 200 words.",
            )
            .output_key("executive_summary")
            .build()?,
    );

    let research_team = Arc::new(ParallelAgent::new(
        "ParallelResearchTeam",
        vec![tech_researcher, health_researcher, finance_researcher],
    ));

    Ok(Arc::new(SequentialAgent::new(
        "ResearchSystem",
        vec![research_team, aggregator_agent],
    )))
}

/// Demo 4: write a first draft, then alternate critic and refiner until
/// the critic approves (the refiner escalates via exit_loop) or the
/// iteration cap is hit.
pub fn story_refinement(model: Arc<dyn Llm>) -> Result<Arc<dyn Agent>> {
    let initial_writer = Arc::new(
        LlmAgent::builder("InitialWriterAgent")
            .model(model.clone())
            .instruction(
                "Based on the user's prompt, write the first draft of a short story \
                 (around 100-150 words).\n\
                 Output only the story text, with no introduction or explanation.",
            )
            .output_key("current_story")
            .build()?,
    );

    let critic_agent = Arc::new(
        LlmAgent::builder("CriticAgent")
            .model(model.clone())
            .instruction(
                "You are a constructive story critic. Review the story provided below.\n\
                 Story: {current_story}\n\n\
                 Evaluate the story's plot, characters, and pacing.\n\
                 - If the story is well-written and complete, you MUST respond with the \
                 exact phrase: \"APPROVED\"\n\
                 - Otherwise, provide 2-3 specific, actionable suggestions for improvement.",
            )
            .output_key("critique")
            .build()?,
    );

    let refiner_agent = Arc::new(
        LlmAgent::builder("RefinerAgent")
            .model(model)
            .instruction(
                "You are a story refiner. You have a story draft and critique.\n\n\
                 Story Draft: {current_story}\n\
                 Critique: {critique}\n\n\
                 Your task is to analyze the critique.\n\
                 - IF the critique is EXACTLY \"APPROVED\", you MUST call the `exit_loop` \
                 function and nothing else.\n\
                 - OTHERWISE, rewrite the story draft to fully incorporate the feedback \
                 from the critique.",
            )
            .output_key("current_story")
            .tool(Arc::new(ExitLoopTool::new()))
            .build()?,
    );

    let refinement_loop = Arc::new(
        LoopAgent::new("StoryRefinementLoop", vec![critic_agent, refiner_agent])
            .with_max_iterations(2),
    );

    Ok(Arc::new(SequentialAgent::new(
        "StoryPipeline",
        vec![initial_writer, refinement_loop],
    )))
}
