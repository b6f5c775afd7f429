//! # Live Debate
//!
//! Runs the debate against Groq's OpenAI-compatible chat completions API.
//! Five rounds, each agent seeing what the previous ones said:
//!
//! 1. Actuary proposal
//! 2. Fiscal Ghost objection
//! 3. Refiner challenge
//! 4. Nexus insight
//! 5. Refiner consensus

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::MessageKind;
use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::models::{DebateAgent, ModelConfig, GROQ_API_KEY_ENV};

/// One turn of a live debate, in the order it was spoken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveTurn {
    pub agent: DebateAgent,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

impl LiveTurn {
    pub fn new(agent: DebateAgent, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            agent,
            kind,
            content: content.into(),
        }
    }
}

/// Transcript of a finished live debate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveDebate {
    pub city: String,
    pub topic: String,
    pub debate: Vec<LiveTurn>,
    /// Agent id -> model that answered for it
    pub models: BTreeMap<String, String>,
}

const ROUNDS: [(DebateAgent, MessageKind); 5] = [
    (DebateAgent::Actuary, MessageKind::Proposal),
    (DebateAgent::Fiscal, MessageKind::Objection),
    (DebateAgent::Refiner, MessageKind::Challenge),
    (DebateAgent::Nexus, MessageKind::Insight),
    (DebateAgent::Refiner, MessageKind::Consensus),
];

/// User prompt for debate round `round` (0-based)
fn round_prompt(round: usize, city: &str, topic: &str, context: &str) -> String {
    match round {
        0 => format!(
            "Analyze {topic} for relocating to {city}. What are the health and quality of life considerations? Be specific with data."
        ),
        1 => format!(
            "Analyze {topic} for relocating to {city}. Context: {context}. What are the financial implications? Raise any budget concerns."
        ),
        2 => format!(
            "Review this debate about {topic} in {city}:\n{context}\nIdentify any conflicts and request clarification from agents."
        ),
        3 => format!(
            "Analyze tax implications for {topic} in {city}. Context: {context}. What treaty benefits or compliance issues exist?"
        ),
        _ => format!(
            "Build final consensus for {topic} in {city}. All agent inputs:\n{context}\nSynthesize a final recommendation with confidence score."
        ),
    }
}

/// User prompt for a single-agent analysis
pub fn analysis_prompt(city: &str, topic: &str, context: Option<&str>) -> String {
    let context = context
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("This is the opening analysis.");
    format!(
        "Analyze {topic} for someone relocating to {city}. \nContext from other agents: {context}\nProvide your expert perspective in 2-3 sentences."
    )
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

/// Groq chat client with one model configuration per agent
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    models: HashMap<DebateAgent, ModelConfig>,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            models: DebateAgent::all()
                .into_iter()
                .map(|a| (a, ModelConfig::for_agent(a)))
                .collect(),
        }
    }

    /// Client for `key`; absent or blank keys are `MissingApiKey`
    pub fn from_key(key: Option<String>) -> Result<Self, FlowError> {
        match key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(FlowError::MissingApiKey),
        }
    }

    /// Client for `GROQ_API_KEY`
    pub fn from_env() -> Result<Self, FlowError> {
        Self::from_key(std::env::var(GROQ_API_KEY_ENV).ok())
    }

    /// Apply per-agent model and endpoint overrides
    pub fn with_config(mut self, config: &FlowConfig) -> Self {
        for agent in DebateAgent::all() {
            self.models.insert(agent, config.model_for(agent));
        }
        self
    }

    pub fn model_for(&self, agent: DebateAgent) -> ModelConfig {
        self.models
            .get(&agent)
            .cloned()
            .unwrap_or_else(|| ModelConfig::for_agent(agent))
    }

    /// Agent id -> model name, as reported to clients
    pub fn models(&self) -> BTreeMap<String, String> {
        DebateAgent::all()
            .into_iter()
            .map(|a| (a.id().to_string(), self.model_for(a).model))
            .collect()
    }

    /// One chat completion as `agent`
    pub async fn chat(&self, agent: DebateAgent, user_message: &str) -> Result<String> {
        let config = self.model_for(agent);
        let request = ChatRequest {
            model: &config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: agent.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let response = self
            .http
            .post(&config.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FlowError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::Llm(body).into());
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| FlowError::Llm(format!("malformed response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| FlowError::Llm("response had no choices".to_string()).into())
    }

    /// Single-agent take on `topic` in `city`
    #[tracing::instrument(skip(self, context))]
    pub async fn analyze(
        &self,
        agent: DebateAgent,
        city: &str,
        topic: &str,
        context: Option<&str>,
    ) -> Result<String> {
        self.chat(agent, &analysis_prompt(city, topic, context)).await
    }

    /// Run all five rounds; any failed round fails the debate
    #[tracing::instrument(skip(self))]
    pub async fn run_debate(&self, city: &str, topic: &str) -> Result<LiveDebate> {
        let mut debate = Vec::with_capacity(ROUNDS.len());
        let mut context = String::new();

        for (round, (agent, kind)) in ROUNDS.into_iter().enumerate() {
            let prompt = round_prompt(round, city, topic, &context);
            let reply = self.chat(agent, &prompt).await?;
            tracing::debug!("Round {} answered by {}", round + 1, agent);

            if round + 1 < ROUNDS.len() {
                context.push_str(&format!("{} said: {}\n", agent.trace_name(), reply));
            }
            debate.push(LiveTurn::new(agent, kind, reply));
        }

        Ok(LiveDebate {
            city: city.to_string(),
            topic: topic.to_string(),
            debate,
            models: self.models(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Serve `replies.len()` chat completions, forwarding each request body
    async fn fake_groq(replies: Vec<(u16, String)>) -> (String, mpsc::UnboundedReceiver<serde_json::Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, reply) in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                let body_start = loop {
                    let n = socket.read(&mut chunk).await.unwrap();
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                };
                let headers = String::from_utf8_lossy(&buf[..body_start]).to_lowercase();
                let length: usize = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse().unwrap())
                    .unwrap_or(0);
                while buf.len() < body_start + length {
                    let n = socket.read(&mut chunk).await.unwrap();
                    buf.extend_from_slice(&chunk[..n]);
                }
                let _ = tx.send(serde_json::from_slice(&buf[body_start..body_start + length]).unwrap());

                let body = if status == 200 {
                    serde_json::json!({ "choices": [{ "message": { "content": reply } }] }).to_string()
                } else {
                    reply
                };
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (url, rx)
    }

    fn client_for(url: &str) -> GroqClient {
        let config = FlowConfig {
            groq_base_url: Some(url.to_string()),
            ..Default::default()
        };
        GroqClient::new("test-key").with_config(&config)
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(GroqClient::from_key(None), Err(FlowError::MissingApiKey)));
        assert!(matches!(
            GroqClient::from_key(Some("   ".to_string())),
            Err(FlowError::MissingApiKey)
        ));
        tokio_test::assert_ok!(GroqClient::from_key(Some("gsk_abc".to_string())));
    }

    #[test]
    fn test_analysis_prompt() {
        assert_eq!(
            analysis_prompt("Lisbon", "Tax optimization", None),
            "Analyze Tax optimization for someone relocating to Lisbon. \nContext from other agents: This is the opening analysis.\nProvide your expert perspective in 2-3 sentences."
        );
        assert!(analysis_prompt("Lisbon", "Tax optimization", Some("Actuary said: ok"))
            .contains("Context from other agents: Actuary said: ok\n"));
    }

    #[test]
    fn test_models_report_overrides() {
        let mut config = FlowConfig::default();
        config
            .per_agent_models
            .insert("nexus".to_string(), "llama-3.1-8b-instant".to_string());
        let models = GroqClient::new("k").with_config(&config).models();
        assert_eq!(models["nexus"], "llama-3.1-8b-instant");
        assert_eq!(models["fiscal"], "mixtral-8x7b-32768");
        assert_eq!(models.len(), 4);
    }

    #[tokio::test]
    async fn test_run_debate_accumulates_context() {
        let replies = (1..=5).map(|i| (200, format!("reply {}", i))).collect();
        let (url, mut requests) = fake_groq(replies).await;

        let debate = client_for(&url).run_debate("Tokyo", "Healthcare quality").await.unwrap();

        let kinds: Vec<_> = debate.debate.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::Proposal,
                MessageKind::Objection,
                MessageKind::Challenge,
                MessageKind::Insight,
                MessageKind::Consensus
            ]
        );
        assert_eq!(debate.debate[4].content, "reply 5");
        assert_eq!(debate.debate[4].agent, DebateAgent::Refiner);

        let first = requests.recv().await.unwrap();
        assert_eq!(first["model"], "llama-3.3-70b-versatile");
        assert_eq!(first["max_tokens"], 200);
        assert_eq!(first["messages"][0]["role"], "system");

        let second = requests.recv().await.unwrap();
        assert_eq!(second["model"], "mixtral-8x7b-32768");
        let prompt = second["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("Context: Actuary said: reply 1\n."));

        let _ = requests.recv().await;
        let _ = requests.recv().await;
        let last = requests.recv().await.unwrap();
        let prompt = last["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains(
            "Actuary said: reply 1\nFiscal Ghost said: reply 2\nRefiner said: reply 3\nNexus said: reply 4\n"
        ));
    }

    #[tokio::test]
    async fn test_upstream_error_is_reported() {
        let (url, _requests) = fake_groq(vec![(401, "invalid api key".to_string())]).await;

        let err = client_for(&url)
            .analyze(DebateAgent::Actuary, "Berlin", "Healthcare quality", None)
            .await
            .unwrap_err();

        match err.downcast_ref::<FlowError>() {
            Some(FlowError::Llm(body)) => assert_eq!(body, "invalid api key"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
