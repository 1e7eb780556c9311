//! One function per subcommand.
//!
//! Each prints operator-facing status to stdout, logs failures and returns
//! normally. The return value says whether the workflow got to the end.

use crate::config::Config;
use chrono::{DateTime, Utc};
use dialer_types::{CallSpec, SipParticipantDescriptor, TrunkDescriptor, TRUNK_ID_KEY};
use dialer_voice::diagnostics;
use dialer_voice::probe::probe_agent_connection;
use dialer_voice::runner::{RunOutcome, DEV_MODE};
use dialer_voice::{
    AgentRunner, CallOriginator, PlatformApi, Provisioned, TrunkProvisioner, VoiceError,
    VoiceService,
};
use std::path::Path;
use std::time::Duration;
use tracing::error;

const RULE: &str = "==================================================";

/// Provisions (or reuses) the outbound trunk. Returns its ID.
pub async fn setup_trunk(config: &Config, platform: &dyn PlatformApi) -> Option<String> {
    let env_file = config.env_file();
    let provisioner = TrunkProvisioner::new(platform, &env_file);

    match provisioner.ensure_trunk(&config.trunk_spec()).await {
        Ok(provisioned) if provisioned.created => {
            println!("Created trunk: {}", provisioned.trunk_id());
            print_trunk(&provisioned.trunk);
            println!("{}", persist_notice(&config.env_file, &provisioned));
            Some(provisioned.trunk.sip_trunk_id)
        }
        Ok(provisioned) => {
            println!("Using existing trunk: {}", provisioned.trunk_id());
            print_trunk(&provisioned.trunk);
            Some(provisioned.trunk.sip_trunk_id)
        }
        Err(e) => {
            error!(error = %e, "trunk provisioning failed");
            println!("Error creating trunk: {}", e);
            None
        }
    }
}

/// Status line for a newly created trunk's ID write.
pub fn persist_notice(env_path: &Path, provisioned: &Provisioned) -> String {
    if provisioned.persisted {
        format!(
            "Updated {}: {}={}",
            env_path.display(),
            TRUNK_ID_KEY,
            provisioned.trunk_id()
        )
    } else {
        format!(
            "Warning: could not write {}. Add {}={} by hand.",
            env_path.display(),
            TRUNK_ID_KEY,
            provisioned.trunk_id()
        )
    }
}

/// Places the quick-dial call through the configured trunk.
pub async fn place_call(
    config: &Config,
    platform: &dyn PlatformApi,
) -> Option<SipParticipantDescriptor> {
    let call = CallSpec::quick_dial(&config.call.from_number, &config.call.to_number);
    dial(platform, config.trunk_id.as_deref(), &call).await
}

/// Full run: check configuration, provision the trunk, call in a fresh room.
///
/// `confirm` is asked whether to go on when the SIP credentials are still
/// placeholders; it receives the offending key names.
pub async fn complete_setup(
    config: &Config,
    platform: &dyn PlatformApi,
    confirm: impl FnOnce(&[&str]) -> bool,
) -> bool {
    let missing = config.missing_required();
    if !missing.is_empty() {
        println!("Missing required configuration: {}", missing.join(", "));
        println!("Please check {}.", config.env_file.display());
        return false;
    }

    let placeholders = config.sip.placeholder_credentials();
    if !placeholders.is_empty() {
        println!("Warning: SIP credentials not configured properly.");
        println!("Please update these in {}:", config.env_file.display());
        for key in &placeholders {
            println!("   {}=<value from your SIP provider>", key);
        }
        if !confirm(&placeholders) {
            return false;
        }
    }

    println!("Starting complete SIP setup");
    println!("{}", RULE);

    let Some(trunk_id) = setup_trunk(config, platform).await else {
        println!("Failed to create or find a trunk. Exiting.");
        return false;
    };

    let call = CallSpec::session(
        &config.call.from_number,
        &config.call.to_number,
        Utc::now().timestamp(),
    );
    if dial(platform, Some(&trunk_id), &call).await.is_none() {
        println!("Failed to initiate call. Exiting.");
        return false;
    }

    println!("{}", RULE);
    println!("Setup complete. The agent is now calling.");
    println!("Next steps:");
    println!("   1. Start the agent with `dialer run-agent` if it is not running");
    println!("   2. Watch the call with `dialer monitor` or the LiveKit dashboard");
    true
}

async fn dial(
    platform: &dyn PlatformApi,
    trunk_id: Option<&str>,
    call: &CallSpec,
) -> Option<SipParticipantDescriptor> {
    println!(
        "Initiating call from {} to {} in room {}...",
        call.call_from, call.call_to, call.room_name
    );

    match CallOriginator::new(platform).dial(trunk_id, call).await {
        Ok(participant) => {
            println!("Call initiated successfully!");
            println!("   Participant ID: {}", participant.participant_id);
            println!("   Participant Identity: {}", participant.participant_identity);
            println!("   Room Name: {}", participant.room_name);
            println!("   SIP Call ID: {}", participant.sip_call_id);
            Some(participant)
        }
        Err(VoiceError::MissingTrunk) => {
            println!("Error: SIP_OUTBOUND_TRUNK_ID not found. Run `dialer setup-trunk` first.");
            None
        }
        Err(e) => {
            error!(error = %e, "call origination failed");
            println!("Error making call: {}", e);
            None
        }
    }
}

/// Prints matching rooms.
pub async fn monitor(config: &Config, platform: &dyn PlatformApi) -> bool {
    println!("Monitoring SIP calls...");
    println!("{}", RULE);

    match diagnostics::monitor(platform, &config.room_filters).await {
        Ok(rooms) => {
            for room in &rooms {
                println!("   Room: {}", room.name);
                println!("   Participants: {}", room.num_participants);
                println!("   Created: {}", format_unix(room.creation_time));
            }
            println!("{}", RULE);
            println!("Monitoring complete");
            true
        }
        Err(e) => {
            error!(error = %e, "monitoring failed");
            println!("Error monitoring calls: {}", e);
            false
        }
    }
}

/// Prints matching rooms and their participants.
pub async fn diagnose(config: &Config, platform: &dyn PlatformApi) -> bool {
    println!("System diagnosis");
    println!("{}", RULE);

    match diagnostics::diagnose(platform, &config.room_filters).await {
        Ok(reports) => {
            for report in &reports {
                let room = &report.room;
                println!("   Room: {}", room.name);
                println!("      Participants: {}", room.num_participants);
                println!("      Created: {}", format_unix(room.creation_time));
                println!("      Empty Timeout: {}s", room.empty_timeout);
                println!("      Participant Details:");
                for p in &report.participants {
                    println!(
                        "        - {} ({}) - {}",
                        p.identity,
                        p.state.label(),
                        p.kind.label()
                    );
                    println!("          Joined: {}", format_unix(p.joined_at));
                    println!("          Tracks: {}", p.track_count);
                }
            }
            println!("{}", RULE);
            println!("Diagnosis complete");
            true
        }
        Err(e) => {
            error!(error = %e, "diagnosis failed");
            println!("Error during diagnosis: {}", e);
            false
        }
    }
}

/// Opens the probe room and reports whether an agent joined it.
pub async fn test_agent(platform: &dyn PlatformApi, room_name: &str, wait: Duration) -> bool {
    println!("Testing agent connection");
    println!("{}", RULE);
    println!(
        "Creating test room {} and waiting {}s for an agent to join...",
        room_name,
        wait.as_secs()
    );

    match probe_agent_connection(platform, room_name, wait).await {
        Ok(report) => {
            println!("Participants in room:");
            for p in &report.participants {
                println!("   - {} ({}) - {}", p.identity, p.state.label(), p.kind.label());
            }
            if report.agent_joined() {
                println!("Agent connected successfully!");
            } else {
                println!("No agent connected to room");
            }
            if report.cleaned_up {
                println!("Cleaned up test room");
            }
            report.agent_joined()
        }
        Err(e) => {
            error!(error = %e, "agent connection test failed");
            println!("Error during test: {}", e);
            false
        }
    }
}

/// Launches the agent host in dev mode and waits for it to exit.
pub async fn run_agent(config: &Config) -> bool {
    println!("Starting calling agent");
    println!("{}", RULE);
    println!("Agent configuration:");
    println!("  - Mode: Development (for SIP calls)");
    println!("  - Script: Real Estate Property Inquiry");
    println!("  - Voice: OpenAI TTS (alloy)");
    println!("  - STT: Deepgram nova-2");
    println!("  - LLM: OpenAI gpt-4o-mini");
    println!("{}", RULE);

    let runner = match AgentRunner::from_command_line(&config.agent_command) {
        Ok(runner) => runner,
        Err(e) => {
            println!("Error: {}", e);
            return false;
        }
    };

    println!("Running command: {}", runner.command_line(DEV_MODE).join(" "));
    println!("The agent joins calls made through `dialer setup` or `dialer call`.");
    println!("Press Ctrl+C to stop the agent.");

    match runner.run(DEV_MODE).await {
        Ok(RunOutcome::Exited(status)) => {
            println!("Agent exited: {}", status);
            status.success()
        }
        Ok(RunOutcome::Interrupted) => {
            println!("Agent stopped by user.");
            true
        }
        Err(e) => {
            error!(error = %e, "agent host failed");
            println!("Error running agent: {}", e);
            false
        }
    }
}

/// Prints a join token for an agent worker.
pub fn agent_token(service: &VoiceService, room: &str, identity: &str) -> bool {
    match service.generate_join_token(room, identity, identity) {
        Ok(token) => {
            println!("{}", token);
            true
        }
        Err(e) => {
            error!(error = %e, "failed to mint join token");
            println!("Error generating token: {}", e);
            false
        }
    }
}

fn print_trunk(trunk: &TrunkDescriptor) {
    println!("  - ID: {}", trunk.sip_trunk_id);
    println!("    Name: {}", trunk.name);
    println!("    Address: {}", trunk.address);
    println!("    Numbers: {}", trunk.numbers.join(", "));
}

fn format_unix(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}
