//! Per-task format profiles.
//!
//! Each known [`TaskType`] maps to a [`TaskFormatProfile`]: a sentence of
//! format guidance for the "Output Format Requirements" section and a worked
//! example for the "Example" section. [`TaskType::Custom`] maps to
//! [`FALLBACK`]. The mapping is an exhaustive `match`, so adding a task type
//! without a profile fails to compile.

use crate::options::TaskType;
use serde::Serialize;

/// Format guidance and worked example for one task type.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFormatProfile {
    pub format_guidance: &'static str,
    pub worked_example: &'static str,
}

/// Generic profile for task types without a dedicated entry.
pub const FALLBACK: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, explicitly request a format like structured text, JSON, markdown, or a bulleted list.",
    worked_example: r#"For example, if a key-value format is requested:
```json
{
  "key": "value",
  "another_key": 123
}
```"#,
};

const CODE_GENERATION: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, explicitly state the required programming language, any libraries/frameworks, and the expected structure (e.g., a single function, a full class, a command-line script).",
    worked_example: r#"Here is an example for a simple Python function:
```python
def add(a, b):
    """This function adds two numbers."""
    return a + b
```"#,
};

const API_DESIGN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, specify the API style (e.g., REST, GraphQL), data format (JSON), authentication method, and list the key resource endpoints with their HTTP methods (GET, POST, PUT, DELETE) and expected request/response bodies.",
    worked_example: r#"An example for a REST API endpoint:
**Endpoint:** `/users/{id}`
**Method:** `GET`
**Response (200 OK):**
```json
{
  "id": "user-123",
  "username": "alex",
  "email": "alex@example.com"
}
```"#,
};

const API_TESTING_PLAN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, request a markdown table with columns for 'Test Case', 'Steps', 'Expected Result', and 'Test Type' (e.g., Success, Failure, Security).",
    worked_example: r#"An example test case for an API endpoint:
| Test Case          | Steps                                     | Expected Result                        | Test Type |
|--------------------|-------------------------------------------|----------------------------------------|-----------|
| Valid Login        | POST /login with correct user/pass        | 200 OK with auth token                 | Success   |"#,
};

const DATABASE_SCHEMA_DESIGN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, instruct the AI to define tables, columns with data types (e.g., VARCHAR(255), INTEGER, TIMESTAMP), primary keys, foreign keys, and relationships (e.g., one-to-many, many-to-many).",
    worked_example: r#"An example for a `posts` table in SQL:
```sql
CREATE TABLE posts (
    id INT PRIMARY KEY AUTO_INCREMENT,
    user_id INT,
    title VARCHAR(255) NOT NULL,
    body TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(id)
);
```"#,
};

const SYSTEM_ARCHITECTURE_DESIGN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, ask for the output in markdown, describing the main components (e.g., microservices, database, message queue), their responsibilities, and how they interact. You could also ask for a PlantUML or mermaid.js diagram representation.",
    worked_example: r#"An example description for a simple microservice:
**Service: Authentication Service**
- **Responsibility:** Manages user registration, login, and token generation.
- **Dependencies:** User Database.
- **API:** Exposes `/login`, `/register` endpoints."#,
};

const CODE_REVIEW_FEEDBACK: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, specify that the feedback should be structured by category (e.g., Readability, Performance, Security), pointing to specific lines of code and providing constructive suggestions for improvement.",
    worked_example: r#"An example of a code review comment:
- **File:** `utils.js`, Line 25
- **Issue:** The function uses a synchronous file read which can block the event loop.
- **Suggestion:** Refactor to use `fs.promises.readFile` for asynchronous operation."#,
};

const DEBUGGING_ASSISTANCE: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, instruct the AI to analyze a provided code snippet and error message, and to output a list of potential causes followed by step-by-step suggestions for how to fix the issue.",
    worked_example: r#"An example of a debugging request structure:
**Error:** `TypeError: Cannot read properties of undefined (reading 'map')`
**Code Snippet:**
```javascript
function renderItems(items) {
  return items.map(item => `<li>${item.name}</li>`);
}
```
**Problem:** The error occurs when `items` is not an array."#,
};

const FRONTEND_ERROR_FIX: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, instruct the AI to provide a clear explanation of the bug's root cause, followed by a 'before' and 'after' code block showing the corrected code. Specify the framework (e.g., React, Vue).",
    worked_example: r#"An example of a fix for a React state issue:
**Explanation:** The error is caused by directly mutating the state. React state should be immutable.
**Before:**
```javascript
const handleAddItem = () => {
  items.push('new item');
  setItems(items);
}
```
**After:**
```javascript
const handleAddItem = () => {
  setItems([...items, 'new item']);
}
```"#,
};

const BACKEND_ERROR_FIX: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, instruct the AI to provide a clear explanation of the bug's root cause, followed by a corrected code snippet. Specify the language and framework (e.g., Node.js/Express, Python/Django).",
    worked_example: r#"An example of a fix for an unhandled promise in Node.js:
**Explanation:** The database query is asynchronous but lacks `await` and error handling.
**Before:**
```javascript
app.get('/users/:id', (req, res) => {
  const user = db.users.find(req.params.id);
  res.json(user);
});
```
**After:**
```javascript
app.get('/users/:id', async (req, res) => {
  try {
    const user = await db.users.find(req.params.id);
    if (!user) return res.status(404).send('User not found.');
    res.json(user);
  } catch (error) {
    res.status(500).send('Server Error');
  }
});
```"#,
};

const E2E_TEST_PLAN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, specify that the plan should be formatted as a series of user stories, with each story having a list of test cases that include a description, steps to reproduce, and expected results.",
    worked_example: r#"An example of a test case:
**User Story:** As a user, I want to log in to my account.
**Test Case 1.1:** Successful Login
- **Steps:**
  1. Navigate to the login page.
  2. Enter valid credentials.
  3. Click 'Submit'.
- **Expected Result:** User is redirected to the dashboard."#,
};

const TEXT_SUMMARIZATION: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, specify if the output should be a single paragraph, a series of bullet points, or a numbered list, and define a target length.",
    worked_example: r#"For example, if summarizing a news article, the output might look like this:
- **Main Point:** [Briefly state the main point]
- **Key Detail:** [Highlight a key supporting detail]
- **Conclusion:** [Summarize the conclusion or outcome]"#,
};

const CREATIVE_WRITING: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, define the format (e.g., short story, poem, dialogue script) and any structural requirements like chapter breaks or stanza length.",
    worked_example: r#"For example, a dialogue script might follow this format:
**CHARACTER 1:** (Action) [Dialogue]
**CHARACTER 2:** (Action) [Dialogue]"#,
};

const DATA_ANALYSIS_PLAN: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, instruct the AI to use markdown and structure the output with specific headings like '1. Hypothesis', '2. Data Requirements', '3. Analysis Steps', '4. Expected Visualizations'.",
    worked_example: r#"For instance, the plan should follow this structure:
**1. Hypothesis**
> The new ad campaign will increase user sign-ups by 15%.

**2. Data Requirements**
- User sign-up data from the last 6 months.
- Ad campaign performance metrics (impressions, clicks)."#,
};

const UI_UX_FEEDBACK: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, ask for the feedback to be formatted as a table or a list, categorized by specific heuristics (e.g., 'Usability', 'Accessibility', 'Visual Design'), with columns for 'Issue', 'Recommendation', and 'Severity'.",
    worked_example: r#"An example of the feedback format using a markdown table:
| Category    | Issue                                | Recommendation                            | Severity |
|-------------|--------------------------------------|-------------------------------------------|----------|
| Usability   | The 'Save' button is hard to find.   | Relocate the button to the top-right.     | High     |"#,
};

const CONTENT_CREATION: TaskFormatProfile = TaskFormatProfile {
    format_guidance: "For example, specify the format (e.g., blog post with SEO-optimized headings, a tweet thread, an email) and any required elements like a call-to-action or specific hashtags.",
    worked_example: r#"For instance, a tweet thread might be structured like this:
**Tweet 1/3:** [Hook and main idea]
**Tweet 2/3:** [Supporting detail or data point]
**Tweet 3/3:** [Conclusion and call-to-action] #Hashtag1 #Hashtag2"#,
};

/// Look up the format profile for a task type.
///
/// Total: every value, including [`TaskType::Custom`], yields a profile. A
/// `Custom` label that names a known task type gets that task's profile.
pub fn profile_for(task: &TaskType) -> &'static TaskFormatProfile {
    match task {
        TaskType::CodeGeneration => &CODE_GENERATION,
        TaskType::ApiDesign => &API_DESIGN,
        TaskType::ApiTestingPlan => &API_TESTING_PLAN,
        TaskType::DatabaseSchemaDesign => &DATABASE_SCHEMA_DESIGN,
        TaskType::SystemArchitectureDesign => &SYSTEM_ARCHITECTURE_DESIGN,
        TaskType::CodeReviewFeedback => &CODE_REVIEW_FEEDBACK,
        TaskType::DebuggingAssistance => &DEBUGGING_ASSISTANCE,
        TaskType::FrontendErrorFix => &FRONTEND_ERROR_FIX,
        TaskType::BackendErrorFix => &BACKEND_ERROR_FIX,
        TaskType::E2eTestPlan => &E2E_TEST_PLAN,
        TaskType::TextSummarization => &TEXT_SUMMARIZATION,
        TaskType::CreativeWriting => &CREATIVE_WRITING,
        TaskType::DataAnalysisPlan => &DATA_ANALYSIS_PLAN,
        TaskType::UiUxFeedback => &UI_UX_FEEDBACK,
        TaskType::ContentCreation => &CONTENT_CREATION,
        TaskType::Custom(label) => match TaskType::from_label(label) {
            TaskType::Custom(_) => &FALLBACK,
            known => profile_for(&known),
        },
    }
}
