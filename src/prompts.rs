//! Prompt templates for the five analysis kinds and the smart filter.
//!
//! Every template ends with an explicit JSON-only output contract matching
//! the typed records in [`crate::analysis`]. The oracle is still treated as
//! unreliable; deviations are absorbed by the callers' default records.

use crate::filter::FilterSpec;

pub fn importance(email_content: &str) -> String {
    format!(
        "You are an expert email prioritization assistant. Analyze the importance of this email on a scale of 1-10.\n\
         \n\
         IMPORTANCE SCALE:\n\
         - 1-2: Spam, newsletters, automated notifications\n\
         - 3-4: Social media, promotions, casual conversations\n\
         - 5-6: Work updates, regular communications, scheduling\n\
         - 7-8: Urgent work matters, deadlines, important decisions\n\
         - 9-10: Emergencies, CEO/boss communications, time-critical actions\n\
         \n\
         ANALYSIS FACTORS:\n\
         - Sender authority (boss, client, colleague)\n\
         - Urgency indicators (URGENT, ASAP, deadline)\n\
         - Action requirements (response needed, task assigned)\n\
         - Business impact (revenue, projects, relationships)\n\
         - Time sensitivity (today, this week, immediate)\n\
         \n\
         EMAIL CONTENT:\n\
         {email_content}\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"importance\": 7,\n\
           \"reasoning\": \"Contains urgent project deadline from team lead\",\n\
           \"urgency\": \"low|medium|high|critical\"\n\
         }}"
    )
}

pub fn summary(email_content: &str) -> String {
    format!(
        "You are a professional email summarization assistant. Create a concise, actionable summary.\n\
         \n\
         SUMMARIZATION GUIDELINES:\n\
         - Maximum 2 sentences for summary\n\
         - Focus on key decisions, requests, or information\n\
         - Highlight any deadlines or next steps\n\
         - Extract 3-5 key points maximum\n\
         \n\
         EMAIL CONTENT:\n\
         {email_content}\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"summary\": \"Brief 1-2 sentence summary focusing on key points\",\n\
           \"keyPoints\": [\"First key point\", \"Second key point\"],\n\
           \"tone\": \"professional|casual|urgent|friendly|formal|neutral\"\n\
         }}"
    )
}

pub fn action_items(email_content: &str) -> String {
    format!(
        "You are a task extraction specialist. Identify ALL action items, tasks, and requests from this email.\n\
         \n\
         EXTRACTION CRITERIA:\n\
         - Explicit tasks (\"Please do X\", \"Can you Y\")\n\
         - Implicit requests (\"We need to discuss\", \"Should we consider\")\n\
         - Deadlines and time-sensitive items\n\
         - Follow-up requirements\n\
         - Decision points requiring input\n\
         \n\
         EMAIL CONTENT:\n\
         {email_content}\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"actionItems\": [\n\
             {{\n\
               \"task\": \"Complete project proposal\",\n\
               \"deadline\": \"2024-01-15 or 'no deadline'\",\n\
               \"priority\": \"low|medium|high\",\n\
               \"assignee\": \"me|sender|other\",\n\
               \"category\": \"work|personal|administrative\"\n\
             }}\n\
           ],\n\
           \"hasDeadlines\": true,\n\
           \"requiresResponse\": true\n\
         }}"
    )
}

pub fn sentiment(email_content: &str) -> String {
    format!(
        "You are an emotional intelligence expert. Analyze the sentiment and emotional tone of this email.\n\
         \n\
         SENTIMENT ANALYSIS:\n\
         - Overall sentiment: positive, negative, neutral\n\
         - Emotional undertones: happy, angry, frustrated, excited, worried, satisfied\n\
         - Whether the email is a complaint or praise\n\
         \n\
         EMAIL CONTENT:\n\
         {email_content}\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"sentiment\": \"positive|negative|neutral\",\n\
           \"emotion\": \"happy|angry|frustrated|excited|worried|satisfied|neutral\",\n\
           \"confidence\": 0.85,\n\
           \"isComplaint\": false,\n\
           \"isPraise\": false\n\
         }}"
    )
}

pub fn classification(email_content: &str, subject: &str) -> String {
    format!(
        "You are a professional email categorization system. Classify this email into appropriate business categories.\n\
         \n\
         CLASSIFICATION CATEGORIES:\n\
         - Primary: work, personal, finance, travel, shopping, social, news, marketing, spam\n\
         - Secondary: meetings, deadlines, requests, updates, decisions, reports\n\
         \n\
         BUSINESS RELEVANCE:\n\
         - High: Direct work tasks, client communications, urgent decisions\n\
         - Medium: Team updates, scheduled meetings, informational content\n\
         - Low: Newsletters, promotions, casual conversations\n\
         \n\
         SUBJECT: {subject}\n\
         EMAIL CONTENT: {email_content}\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"primaryCategory\": \"work\",\n\
           \"secondaryCategories\": [\"meetings\", \"deadlines\"],\n\
           \"isAutomated\": false,\n\
           \"isNewsletter\": false,\n\
           \"isPromotion\": false,\n\
           \"businessRelevance\": \"low|medium|high\"\n\
         }}"
    )
}

pub fn smart_filter(email_content: &str, criteria: &FilterSpec) -> String {
    let criteria_json =
        serde_json::to_string(criteria).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You are an intelligent email filtering system. Determine if this email matches the specified criteria.\n\
         \n\
         FILTER CRITERIA: {criteria_json}\n\
         \n\
         EMAIL CONTENT:\n\
         {email_content}\n\
         \n\
         FILTERING RULES:\n\
         - Exact match: Must contain specific keywords\n\
         - Semantic match: Similar meaning or intent\n\
         - Sender-based: From specific people or domains\n\
         - Content-based: Type of information or requests\n\
         - Time-based: Urgency or deadline requirements\n\
         \n\
         RESPOND WITH ONLY THIS JSON FORMAT:\n\
         {{\n\
           \"matches\": true,\n\
           \"matchedCriteria\": [\"urgent\", \"from_boss\"],\n\
           \"confidence\": 0.92,\n\
           \"filterReason\": \"Contains urgent deadline request from manager\",\n\
           \"suggestedFolder\": \"Priority Inbox\",\n\
           \"autoActions\": [\"mark_important\", \"add_flag\"]\n\
         }}"
    )
}
