//! `chat`, `emergency` and `models`.

use chat_relay::{ChatRelay, ChatReply, Conversation};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::AppResult;

/// Print a reply, marking offline ones.
pub fn print_reply(reply: &ChatReply) {
    if reply.is_fallback() {
        println!("{}\n(offline reply)", reply.text);
    } else {
        println!("{}", reply.text);
    }
}

/// Add `message` to the conversation and print the assistant's answer.
pub async fn exchange(
    relay: &ChatRelay,
    conversation: &mut Conversation,
    message: &str,
) -> AppResult<()> {
    conversation.push_user(message);
    let reply = relay.send_chat(conversation.messages()).await?;
    print_reply(&reply);
    conversation.push_assistant(reply.text);
    Ok(())
}

/// `aksha chat [message]`.
pub async fn run(app: &App, message: Option<&str>, model: Option<&str>) -> AppResult<()> {
    let relay = app.relay(model)?;
    let mut conversation = Conversation::new();

    if let Some(message) = message {
        return exchange(&relay, &mut conversation, message).await;
    }

    println!("{}", chat_relay::WELCOME_MESSAGE);
    println!("(type 'quit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            _ => exchange(&relay, &mut conversation, line).await?,
        }
    }
    Ok(())
}

/// `aksha emergency <situation>`.
pub async fn emergency(app: &App, situation: &str, location: Option<&str>) -> AppResult<()> {
    let reply = app.relay(None)?.emergency_guidance(situation, location).await;
    print_reply(&reply);
    Ok(())
}

/// `aksha models`.
pub async fn models(app: &App) -> AppResult<()> {
    for model in app.api.models().await? {
        println!("{}", model);
    }
    Ok(())
}
