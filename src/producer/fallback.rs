use super::{ProducerError, ProducerRequest, TaskProducer};
use crate::task::{RawTask, TaskCategory, TaskPriority};
use serde::{Deserialize, Serialize};

use crate::task::TaskCategory::{Deployment, Design, Development, Planning, Testing};
use crate::task::TaskPriority::{High, Low, Medium};

/// Which canned plan a goal text maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Product,
    Marketing,
    Event,
    Generic,
}

impl TemplateKind {
    const KEYWORDS: [(TemplateKind, &'static [&'static str]); 3] = [
        (TemplateKind::Product, &["product", "launch", "app", "website"]),
        (TemplateKind::Marketing, &["marketing", "campaign", "promotion"]),
        (TemplateKind::Event, &["event", "conference", "workshop"]),
    ];

    /// First keyword group with a substring match wins; case-insensitive.
    pub fn detect(goal: &str) -> Self {
        let lower = goal.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(kind, _)| *kind)
            .unwrap_or(TemplateKind::Generic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Product => "product",
            TemplateKind::Marketing => "marketing",
            TemplateKind::Event => "event",
            TemplateKind::Generic => "generic",
        }
    }

    fn steps(&self) -> &'static [TemplateStep] {
        match self {
            TemplateKind::Product => PRODUCT,
            TemplateKind::Marketing => MARKETING,
            TemplateKind::Event => EVENT,
            TemplateKind::Generic => GENERIC,
        }
    }
}

struct TemplateStep {
    title: &'static str,
    description: &'static str,
    category: TaskCategory,
    priority: TaskPriority,
    /// Fraction of the total budget.
    share: f64,
    depends_on: &'static [i64],
}

const fn step(
    title: &'static str,
    description: &'static str,
    category: TaskCategory,
    priority: TaskPriority,
    share: f64,
    depends_on: &'static [i64],
) -> TemplateStep {
    TemplateStep {
        title,
        description,
        category,
        priority,
        share,
        depends_on,
    }
}

const PRODUCT: &[TemplateStep] = &[
    step(
        "Market research and competitive analysis",
        "Profile the target audience, review the main competitors and write down the gaps the product can fill.",
        Planning,
        High,
        0.12,
        &[],
    ),
    step(
        "Product requirements and feature specification",
        "Write user stories with acceptance criteria, set performance targets and rank features for the first release.",
        Planning,
        High,
        0.10,
        &[0],
    ),
    step(
        "Design system and UI/UX mockups",
        "Define colours, type and components, then produce high-fidelity screens and a clickable prototype.",
        Design,
        High,
        0.15,
        &[1],
    ),
    step(
        "Development environment setup",
        "Create the repository, CI pipeline and the development, staging and production environments.",
        Development,
        High,
        0.08,
        &[2],
    ),
    step(
        "Core functionality development",
        "Implement the domain logic, data model, API endpoints and authentication.",
        Development,
        High,
        0.25,
        &[3],
    ),
    step(
        "Frontend implementation",
        "Build the responsive UI, state handling, form validation and data fetching.",
        Development,
        High,
        0.18,
        &[3],
    ),
    step(
        "Integration and API connections",
        "Wire the frontend to the backend and hook up payments, analytics and email.",
        Development,
        Medium,
        0.10,
        &[4, 5],
    ),
    step(
        "Comprehensive testing and QA",
        "Run unit, integration and end-to-end suites across browsers and devices, then fix blocking bugs.",
        Testing,
        High,
        0.12,
        &[6],
    ),
    step(
        "User acceptance testing and feedback",
        "Put the build in front of beta users, collect feedback and fix what blocks acceptance.",
        Testing,
        Medium,
        0.08,
        &[7],
    ),
    step(
        "Marketing materials and content creation",
        "Write landing page copy, capture screenshots and prepare announcement content.",
        Design,
        Medium,
        0.10,
        &[2],
    ),
    step(
        "Documentation and help resources",
        "Write the user guide, FAQ and troubleshooting notes.",
        Deployment,
        Low,
        0.07,
        &[8],
    ),
    step(
        "Production deployment and launch",
        "Provision production, enable monitoring and backups, and run the launch checklist.",
        Deployment,
        High,
        0.05,
        &[8, 9],
    ),
];

const MARKETING: &[TemplateStep] = &[
    step(
        "Campaign strategy and objectives",
        "Set measurable goals, budget and the channels the campaign will use.",
        Planning,
        High,
        0.12,
        &[],
    ),
    step(
        "Market research and audience analysis",
        "Segment the audience and study what competing campaigns do.",
        Planning,
        High,
        0.15,
        &[0],
    ),
    step(
        "Content strategy and editorial calendar",
        "Decide the key messages and schedule content per channel.",
        Planning,
        High,
        0.10,
        &[1],
    ),
    step(
        "Creative assets and design",
        "Produce visuals, video and ad creatives in every required format.",
        Design,
        High,
        0.18,
        &[2],
    ),
    step(
        "Content creation and copywriting",
        "Write ad copy, landing pages, emails and social posts.",
        Development,
        High,
        0.20,
        &[3],
    ),
    step(
        "Campaign platform setup and integration",
        "Configure ad accounts, tracking pixels, email automation and analytics.",
        Development,
        High,
        0.10,
        &[3],
    ),
    step(
        "Campaign launch and activation",
        "Publish across channels and watch the first results closely.",
        Deployment,
        High,
        0.08,
        &[4, 5],
    ),
    step(
        "Performance monitoring and optimization",
        "Track the key metrics, run A/B tests and shift budget to what works.",
        Testing,
        High,
        0.15,
        &[6],
    ),
    step(
        "Campaign analysis and reporting",
        "Summarise results against the objectives and record the lessons learned.",
        Testing,
        Medium,
        0.07,
        &[7],
    ),
];

const EVENT: &[TemplateStep] = &[
    step(
        "Event concept and strategic planning",
        "Fix the theme, audience, format, budget and success measures.",
        Planning,
        High,
        0.10,
        &[],
    ),
    step(
        "Venue selection and contract negotiation",
        "Shortlist venues, visit them and sign the contract.",
        Planning,
        High,
        0.12,
        &[0],
    ),
    step(
        "Speaker recruitment and content planning",
        "Invite speakers, confirm sessions and build the agenda.",
        Planning,
        High,
        0.15,
        &[1],
    ),
    step(
        "Event branding and website development",
        "Create the visual identity and publish the event site.",
        Design,
        High,
        0.12,
        &[2],
    ),
    step(
        "Marketing and promotional campaign",
        "Promote through email, social media and partners.",
        Development,
        High,
        0.18,
        &[3],
    ),
    step(
        "Registration and ticketing infrastructure",
        "Set up ticket tiers, payments, confirmations and check-in.",
        Development,
        High,
        0.08,
        &[3],
    ),
    step(
        "Logistics coordination and vendor management",
        "Book catering, audio-visual, signage and staffing.",
        Development,
        Medium,
        0.12,
        &[1, 5],
    ),
    step(
        "Event execution and on-site management",
        "Run the day: registration, sessions, speakers and vendors.",
        Deployment,
        High,
        0.08,
        &[6],
    ),
    step(
        "Post-event follow-up and impact analysis",
        "Send surveys and recordings, then report on attendance and feedback.",
        Testing,
        Medium,
        0.05,
        &[7],
    ),
];

const GENERIC: &[TemplateStep] = &[
    step(
        "Project scope and requirements gathering",
        "Interview stakeholders, write down requirements and agree on scope and success criteria.",
        Planning,
        High,
        0.15,
        &[],
    ),
    step(
        "Research and feasibility analysis",
        "Evaluate options, estimate resources and identify the main risks.",
        Planning,
        High,
        0.12,
        &[0],
    ),
    step(
        "Detailed planning and system design",
        "Break the work down, design the solution and set milestones.",
        Design,
        High,
        0.15,
        &[1],
    ),
    step(
        "Environment setup and tool configuration",
        "Prepare tools, access and the working environment.",
        Development,
        High,
        0.08,
        &[2],
    ),
    step(
        "Core implementation phase 1",
        "Build the foundational pieces and the most critical features.",
        Development,
        High,
        0.18,
        &[3],
    ),
    step(
        "Core implementation phase 2",
        "Complete the remaining features and integrate the parts.",
        Development,
        High,
        0.15,
        &[4],
    ),
    step(
        "Comprehensive testing and quality assurance",
        "Test every component and workflow, then fix critical issues.",
        Testing,
        High,
        0.12,
        &[5],
    ),
    step(
        "User acceptance testing and feedback",
        "Have stakeholders validate the result and address their feedback.",
        Testing,
        Medium,
        0.08,
        &[6],
    ),
    step(
        "Documentation and knowledge transfer",
        "Write the documentation and hand over to the people who will maintain it.",
        Deployment,
        Medium,
        0.07,
        &[7],
    ),
    step(
        "Production deployment and launch",
        "Roll out, monitor closely and confirm everything works.",
        Deployment,
        High,
        0.05,
        &[8],
    ),
];

/// Deterministic local producer keyed on words in the goal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProducer;

impl FallbackProducer {
    pub fn new() -> Self {
        Self
    }

    pub fn template_for(&self, goal: &str) -> TemplateKind {
        TemplateKind::detect(goal)
    }

    /// Template tasks with durations scaled to `request.total_days`.
    pub fn tasks_for(&self, request: &ProducerRequest) -> Vec<RawTask> {
        self.template_for(&request.goal)
            .steps()
            .iter()
            .map(|step| RawTask {
                title: step.title.to_string(),
                description: step.description.to_string(),
                category: step.category,
                priority: step.priority,
                estimated_duration_days: request.total_days * step.share,
                depends_on: step.depends_on.to_vec(),
            })
            .collect()
    }
}

impl TaskProducer for FallbackProducer {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn produce(&self, request: &ProducerRequest) -> Result<Vec<RawTask>, ProducerError> {
        Ok(self.tasks_for(request))
    }
}
