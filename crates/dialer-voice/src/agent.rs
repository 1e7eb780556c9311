//! Conversational agent bootstrap.
//!
//! The worker runtime hands [`entrypoint`] a [`JobContext`] for one room.
//! Speech detection, transcription, response generation, synthesis and
//! barge-in all live inside the [`VoiceAssistant`] the runtime builds; this
//! module only wires it up with a fixed prompt and speaks the opening line.

use crate::error::VoiceError;
use async_trait::async_trait;
use dialer_types::AGENT_IDENTITY_PREFIX;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Capacity a runtime should give the per-room event broadcast channel.
pub const DEFAULT_ROOM_EVENT_CAPACITY: usize = 256;

pub const SYSTEM_PROMPT: &str = "You are Elliott, a serious, professional outbound calling \
assistant for real estate. Your sole task is to ask property owners if they are open to selling \
their home right now. Do NOT sound overly friendly. Stay neutral, concise, and direct. \
Start with: 'Hi, this is Elliott, I'm with a local realtor. I was checking your property. Do you \
still own that by any chance?' \
If they say YES to owning: 'Got it, with the home prices being so high right now would you \
consider selling at this time?' \
If they say NO to selling: End the call politely. \
If they say YES to selling: Ask qualification questions about timeline, price, and motivation. \
Handle common objections professionally and end calls when appropriate.";

pub const OPENING_LINE: &str = "Hi, this is Elliott, I'm with a local realtor. I was checking \
your property. Do you still own that by any chance?";

/// Which tracks the agent subscribes to when it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSubscribe {
    SubscribeAll,
    SubscribeNone,
    AudioOnly,
    VideoOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    pub identity: String,
    pub name: String,
}

impl RemoteParticipant {
    pub fn is_agent(&self) -> bool {
        self.identity.starts_with(AGENT_IDENTITY_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    ParticipantConnected(RemoteParticipant),
    ParticipantDisconnected(RemoteParticipant),
}

/// One dispatched job, as seen by the agent.
#[async_trait]
pub trait JobContext: Send + Sync {
    fn room_name(&self) -> &str;

    async fn connect(&self, auto_subscribe: AutoSubscribe) -> Result<(), VoiceError>;

    /// Returns a receiver for room events from this point on.
    fn subscribe(&self) -> broadcast::Receiver<RoomEvent>;
}

/// The runtime's prebuilt VAD + STT + LLM + TTS turn-taking unit.
#[async_trait]
pub trait VoiceAssistant: Send + Sync {
    /// Starts listening and responding in the room.
    fn start(&self, room_name: &str) -> Result<(), VoiceError>;

    async fn say(&self, text: &str, allow_interruptions: bool) -> Result<(), VoiceError>;
}

/// Builds a [`VoiceAssistant`] from plugin choices.
pub trait AssistantBuilder: Send + Sync {
    fn build(&self, settings: &AssistantSettings) -> Result<Arc<dyn VoiceAssistant>, VoiceError>;
}

/// A plugin provider and the model or voice to load from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginChoice {
    pub provider: String,
    pub model: String,
}

impl PluginChoice {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub vad: PluginChoice,
    pub stt: PluginChoice,
    pub llm: PluginChoice,
    pub tts: PluginChoice,
    pub system_prompt: String,
    pub opening_line: String,
    /// Pause between starting the assistant and the unprompted greeting.
    pub greeting_delay: Duration,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            vad: PluginChoice::new("silero", "silero-vad"),
            stt: PluginChoice::new("deepgram", "nova-2"),
            llm: PluginChoice::new("openai", "gpt-4o-mini"),
            tts: PluginChoice::new("openai", "alloy"),
            system_prompt: SYSTEM_PROMPT.to_string(),
            opening_line: OPENING_LINE.to_string(),
            greeting_delay: Duration::from_secs(3),
        }
    }
}

/// A running agent: the assistant plus the task consuming room events.
pub struct AgentSession {
    pub assistant: Arc<dyn VoiceAssistant>,
    events: JoinHandle<()>,
}

impl AgentSession {
    /// Waits until the room's event stream closes.
    pub async fn run_until_closed(self) {
        if let Err(e) = self.events.await {
            warn!(error = %e, "room event task ended abnormally");
        }
    }

    pub fn abort(&self) {
        self.events.abort();
    }
}

/// Joins the job's room with audio only and starts the assistant.
pub async fn entrypoint(
    ctx: &dyn JobContext,
    builder: &dyn AssistantBuilder,
    settings: &AssistantSettings,
) -> Result<AgentSession, VoiceError> {
    info!(room = ctx.room_name(), "SIP agent starting");

    ctx.connect(AutoSubscribe::AudioOnly).await?;
    info!(room = ctx.room_name(), "connected to room");

    let assistant = builder.build(settings)?;
    assistant.start(ctx.room_name())?;

    let events = tokio::spawn(handle_room_events(
        ctx.subscribe(),
        Arc::clone(&assistant),
        settings.opening_line.clone(),
    ));
    info!(room = ctx.room_name(), "SIP agent ready");

    tokio::time::sleep(settings.greeting_delay).await;
    info!("sending initial greeting");
    if let Err(e) = assistant.say(&settings.opening_line, true).await {
        // Nobody will own the session; stop greeting later joiners.
        events.abort();
        return Err(e);
    }

    Ok(AgentSession { assistant, events })
}

async fn handle_room_events(
    mut rx: broadcast::Receiver<RoomEvent>,
    assistant: Arc<dyn VoiceAssistant>,
    opening_line: String,
) {
    loop {
        match rx.recv().await {
            Ok(RoomEvent::ParticipantConnected(participant)) => {
                info!(identity = %participant.identity, "participant joined");
                if participant.is_agent() {
                    continue;
                }
                info!(
                    identity = %participant.identity,
                    "starting conversation with SIP participant"
                );
                let assistant = Arc::clone(&assistant);
                let line = opening_line.clone();
                tokio::spawn(async move {
                    if let Err(e) = assistant.say(&line, true).await {
                        warn!(error = %e, "greeting failed");
                    }
                });
            }
            Ok(RoomEvent::ParticipantDisconnected(participant)) => {
                info!(identity = %participant.identity, "participant left");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "room event receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
