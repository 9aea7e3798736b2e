//! Chat session state and the handlers that act on it.
//!
//! A [`ChatSession`] is everything one login owns: the username, the
//! connection lifecycle, the active target, the composer input and the view.
//! Handlers never touch the network directly; outbound frames are queued and
//! drained by the connection loop, and view mutations are queued as
//! [`ViewChange`]s for the screen.

use std::{collections::VecDeque, sync::Arc};

use kaiwa_shared::time::Clock;

use crate::{
    command::Command,
    domain::{SessionState, Target, normalize_group_name, validate_username},
    error::ClientError,
    input::LineRequest,
    protocol::{InboundFrame, OutboundFrame},
    view::{ChatView, ViewChange},
};

/// Bubble text shown for every private message. This client holds no keys,
/// so private payloads are never displayed.
pub const PRIVATE_PLACEHOLDER: &str = "[Encrypted Message] (this client cannot decrypt yet)";

const JOIN_GROUP_PROMPT: &str = "Enter Group Name to Join: ";

/// Which question the next typed line answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Compose,
    JoinGroupPrompt,
}

/// What the connection loop should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    ListGroups,
    Help,
    Quit,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    username: Option<String>,
    state: SessionState,
    target: Target,
    input: String,
    mode: InputMode,
    view: ChatView,
    outbox: VecDeque<OutboundFrame>,
}

impl ChatSession {
    /// Create a session whose view stamps entries with the given clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            view: ChatView::new(clock),
            ..Default::default()
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    /// Current composer input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Drain queued outbound frames in the order they were produced
    pub fn take_outbound(&mut self) -> Vec<OutboundFrame> {
        self.outbox.drain(..).collect()
    }

    /// Drain view changes since the last call
    pub fn take_view_changes(&mut self) -> Vec<ViewChange> {
        self.view.take_changes()
    }

    /// Accept a username from the login prompt.
    ///
    /// Nothing changes when the username is blank or a login already happened.
    pub fn login(&mut self, input: &str) -> Result<(), ClientError> {
        let username = validate_username(input)?;
        let Some(next) = self.state.on_login() else {
            return Err(ClientError::AlreadyConnected(
                self.username.clone().unwrap_or_default(),
            ));
        };

        tracing::info!("Logging in as '{}'", username);
        self.username = Some(username);
        self.state = next;
        Ok(())
    }

    /// The connection opened: announce ourselves and swap the login prompt
    /// for the logged-in indicator.
    pub fn on_open(&mut self) {
        let Some(next) = self.state.on_open() else {
            tracing::warn!("Connection opened in state {:?}, ignoring", self.state);
            return;
        };
        let username = self.username.clone().unwrap_or_default();

        tracing::info!("Connected to server");
        self.state = next;
        self.outbox.push_back(OutboundFrame::login(username.as_str()));
        self.view.hide_login_prompt();
        self.view.show_logged_in(&username);
    }

    /// The connection is gone. The session cannot be used afterwards.
    pub fn on_close(&mut self) {
        tracing::info!("Disconnected from server (was {:?})", self.state);
        self.state = self.state.on_close();
    }

    /// Handle one inbound text frame.
    ///
    /// Invalid JSON is returned as an error and nothing is rendered.
    pub fn on_message(&mut self, text: &str) -> Result<(), ClientError> {
        if !self.state.accepts_frames() {
            tracing::warn!("Dropping frame received in state {:?}", self.state);
            return Ok(());
        }
        let frame = InboundFrame::parse(text)?;
        self.dispatch(frame);
        Ok(())
    }

    fn dispatch(&mut self, frame: InboundFrame) {
        match frame {
            InboundFrame::Success {
                message,
                default_model,
            } => {
                self.view.add_system_message(message);
                if let Some(model) = default_model {
                    self.view.add_system_message(format!("Default model: {}", model));
                }
            }
            InboundFrame::Error { message } => {
                self.view.add_system_message(format!("Error: {}", message));
            }
            InboundFrame::Group {
                group,
                from,
                content,
            } => {
                if self.target.is_group(&group) {
                    self.view.add_message_bubble(&from, &content, false);
                } else {
                    tracing::info!("New message in {} from {}", group, from);
                }
            }
            InboundFrame::Private { from } => {
                self.view.add_message_bubble(&from, PRIVATE_PLACEHOLDER, false);
            }
            InboundFrame::Unrecognized => {
                tracing::debug!("Ignoring frame of unknown shape");
            }
        }
    }

    /// Handle one line typed at the prompt
    pub fn handle_line(&mut self, line: &str) -> Result<InputOutcome, ClientError> {
        if self.mode == InputMode::JoinGroupPrompt {
            self.mode = InputMode::Compose;
            self.submit_join_group_prompt(line)?;
            return Ok(InputOutcome::Continue);
        }

        match Command::parse(line)? {
            Command::Join(Some(group)) => self.submit_join_group_prompt(&group)?,
            Command::Join(None) => self.join_group_prompt(),
            Command::Switch(group) => self.select_group(&group)?,
            Command::Post { group, content } => self.post_to_group(&group, &content)?,
            Command::Groups => return Ok(InputOutcome::ListGroups),
            Command::Help => return Ok(InputOutcome::Help),
            Command::Quit => return Ok(InputOutcome::Quit),
            Command::Message(text) => {
                self.set_input(text);
                self.send_message()?;
            }
        }
        Ok(InputOutcome::Continue)
    }

    /// Ctrl+C at the prompt: cancels an open group prompt, otherwise quits.
    pub fn handle_interrupt(&mut self) -> InputOutcome {
        match self.mode {
            InputMode::JoinGroupPrompt => {
                self.mode = InputMode::Compose;
                InputOutcome::Continue
            }
            InputMode::Compose => InputOutcome::Quit,
        }
    }

    /// Ask for a group name; the next line answers it.
    pub fn join_group_prompt(&mut self) {
        self.mode = InputMode::JoinGroupPrompt;
    }

    /// Answer to the group prompt. A blank answer cancels.
    pub fn submit_join_group_prompt(&mut self, answer: &str) -> Result<(), ClientError> {
        match normalize_group_name(answer) {
            Some(group) => self.join_group(&group),
            None => Ok(()),
        }
    }

    /// Join a group: tell the server, list it in the sidebar and show it.
    pub fn join_group(&mut self, group: &str) -> Result<(), ClientError> {
        self.require_logged_in()?;
        self.outbox.push_back(OutboundFrame::join_group(group));
        self.view.add_sidebar_entry(group);
        self.switch_to_group(group);
        Ok(())
    }

    /// Show a group that is already in the sidebar
    pub fn select_group(&mut self, group: &str) -> Result<(), ClientError> {
        if !self.view.sidebar().iter().any(|g| g == group) {
            return Err(ClientError::UnknownGroup(group.to_string()));
        }
        self.switch_to_group(group);
        Ok(())
    }

    /// Make `group` the active target. Previously shown messages are dropped;
    /// there is no history to re-fetch.
    pub fn switch_to_group(&mut self, group: &str) {
        tracing::debug!("Switching to group '{}'", group);
        self.target = Target::Group(group.to_string());
        self.view.clear_log();
        self.view.set_channel_label(format!("# {}", group));
        self.view.add_system_message(format!("Switched to channel #{}", group));
    }

    /// Send the composer input to the active target.
    ///
    /// Blank input is ignored. Without a target the input is kept and
    /// [`ClientError::NoTarget`] is returned. Sent messages are echoed locally
    /// right away because the server does not broadcast them back to the
    /// sender.
    pub fn send_message(&mut self) -> Result<(), ClientError> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return Ok(());
        }

        let Some(group) = self.target.name().map(str::to_string) else {
            return Err(ClientError::NoTarget);
        };
        self.require_logged_in()?;

        match &self.target {
            Target::Group(_) => {
                self.outbox.push_back(OutboundFrame::group(group.as_str(), text.as_str()));
                let username = self.username.clone().unwrap_or_default();
                self.view.add_message_bubble(&username, &text, true);
            }
            Target::Unset => {}
        }

        self.input.clear();
        Ok(())
    }

    /// Post to a joined group without making it the active target.
    ///
    /// The message is only echoed when `group` is the group on screen.
    pub fn post_to_group(&mut self, group: &str, content: &str) -> Result<(), ClientError> {
        if !self.view.sidebar().iter().any(|g| g == group) {
            return Err(ClientError::UnknownGroup(group.to_string()));
        }
        self.require_logged_in()?;

        self.outbox.push_back(OutboundFrame::group(group, content));
        if self.target.is_group(group) {
            let username = self.username.clone().unwrap_or_default();
            self.view.add_message_bubble(&username, content, true);
        }
        Ok(())
    }

    /// What the terminal should ask next
    pub fn line_request(&self) -> LineRequest {
        match self.mode {
            InputMode::JoinGroupPrompt => LineRequest::new(JOIN_GROUP_PROMPT),
            InputMode::Compose => {
                let username = self.username.as_deref().unwrap_or_default();
                let prompt = match self.target.name() {
                    Some(group) => format!("{}#{}> ", username, group),
                    None => format!("{}> ", username),
                };
                LineRequest::new(prompt).with_initial(self.input.clone())
            }
        }
    }

    fn require_logged_in(&self) -> Result<(), ClientError> {
        match self.state {
            SessionState::LoggedIn => Ok(()),
            _ => Err(ClientError::NotConnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use kaiwa_shared::time::FixedClock;

    use super::*;
    use crate::view::LogEntry;

    const NOW: i64 = 1672498800000;

    fn logged_in(username: &str) -> ChatSession {
        let mut session = ChatSession::new(Arc::new(FixedClock::new(NOW)));
        session.login(username).unwrap();
        session.on_open();
        session.take_outbound();
        session.take_view_changes();
        session
    }

    fn bubbles(session: &ChatSession) -> Vec<(String, String)> {
        session
            .view()
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                LogEntry::Bubble { content, .. } => {
                    Some((entry.label().unwrap_or_default().to_string(), content.clone()))
                }
                LogEntry::System { .. } => None,
            })
            .collect()
    }

    fn system_texts(session: &ChatSession) -> Vec<String> {
        session
            .view()
            .entries()
            .iter()
            .filter(|e| !e.is_bubble())
            .map(|e| e.text().to_string())
            .collect()
    }

    #[test]
    fn test_login_with_blank_username_changes_nothing() {
        // テスト項目: 空のユーザー名ではログインできず状態も変わらない
        // given (前提条件):
        let mut session = ChatSession::default();

        // when (操作):
        let result = session.login("   ");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::UsernameRequired)));
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.username().is_none());
    }

    #[test]
    fn test_login_then_open_sends_login_frame_and_shows_indicator() {
        // テスト項目: ログイン後の接続完了でログインフレームが送信され、表示が切り替わる
        // given (前提条件):
        let mut session = ChatSession::default();

        // when (操作):
        session.login("  alice ").unwrap();
        session.on_open();

        // then (期待する結果):
        assert_eq!(session.state(), SessionState::LoggedIn);
        assert_eq!(session.take_outbound(), vec![OutboundFrame::login("alice")]);
        assert!(!session.view().login_prompt_visible());
        assert_eq!(session.view().logged_in_as(), Some("alice"));
        assert_eq!(
            session.take_view_changes(),
            vec![
                ViewChange::LoginPromptHidden,
                ViewChange::LoggedIn("alice".to_string())
            ]
        );
    }

    #[test]
    fn test_second_open_is_ignored() {
        // テスト項目: 二度目の接続完了イベントではログインフレームが再送されない
        // given (前提条件):
        let mut session = logged_in("alice");

        // when (操作):
        session.on_open();

        // then (期待する結果):
        assert!(session.take_outbound().is_empty());
        assert!(session.take_view_changes().is_empty());
    }

    #[test]
    fn test_second_login_is_rejected() {
        // テスト項目: ログイン済みのセッションで再ログインはできない
        // given (前提条件):
        let mut session = logged_in("alice");

        // when (操作):
        let result = session.login("bob");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::AlreadyConnected(name)) if name == "alice"));
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_frames_before_open_are_dropped() {
        // テスト項目: 接続完了前に届いたフレームは描画されない
        // given (前提条件):
        let mut session = ChatSession::default();
        session.login("alice").unwrap();

        // when (操作):
        let result = session.on_message(r#"{"status": "success", "message": "early"}"#);

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(session.view().entries().is_empty());
    }

    #[test]
    fn test_success_and_error_frames_render_system_messages() {
        // テスト項目: success / error フレームがシステムメッセージとして描画される
        // given (前提条件):
        let mut session = logged_in("alice");

        // when (操作):
        session
            .on_message(r#"{"status": "success", "message": "Welcome alice!", "default_model": "m1"}"#)
            .unwrap();
        session
            .on_message(r#"{"status": "error", "message": "You are not in group g9"}"#)
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            system_texts(&session),
            vec![
                "Welcome alice!".to_string(),
                "Default model: m1".to_string(),
                "Error: You are not in group g9".to_string(),
            ]
        );
        assert_eq!(session.view().bubble_count(), 0);
    }

    #[test]
    fn test_group_frame_for_active_group_renders_bubble() {
        // テスト項目: 表示中のグループ宛てメッセージはバブルとして描画される
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("g1").unwrap();

        // when (操作):
        session
            .on_message(r#"{"type": "group", "group": "g1", "from": "alice", "content": "hi"}"#)
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            bubbles(&session),
            vec![("alice".to_string(), "hi".to_string())]
        );
    }

    #[test]
    fn test_group_frame_for_other_group_is_dropped() {
        // テスト項目: 表示中でないグループ宛てメッセージは描画されない
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("g2").unwrap();
        let before = session.view().entries().len();

        // when (操作):
        session
            .on_message(r#"{"type": "group", "group": "g1", "from": "alice", "content": "hi"}"#)
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.view().bubble_count(), 0);
        assert_eq!(session.view().entries().len(), before);
    }

    #[test]
    fn test_group_frame_without_target_is_dropped() {
        // テスト項目: 送信先未選択の状態ではグループメッセージは描画されない
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        session
            .on_message(r#"{"type": "group", "group": "g1", "from": "alice", "content": "hi"}"#)
            .unwrap();

        // then (期待する結果):
        assert!(session.view().entries().is_empty());
    }

    #[test]
    fn test_private_frame_always_renders_placeholder() {
        // テスト項目: private フレームは内容にかかわらず固定文言で描画される
        // given (前提条件):
        let mut session = logged_in("me");
        let payloads = ["secret", "", "gAAAAABk..."];

        // when (操作):
        for payload in payloads {
            let frame = serde_json::json!({"type": "private", "from": "bob", "content": payload});
            session.on_message(&frame.to_string()).unwrap();
        }

        // then (期待する結果):
        let rendered = bubbles(&session);
        assert_eq!(rendered.len(), 3);
        assert!(
            rendered
                .iter()
                .all(|(from, text)| from == "bob" && text == PRIVATE_PLACEHOLDER)
        );
    }

    #[test]
    fn test_malformed_frame_is_an_error_and_renders_nothing() {
        // テスト項目: 不正な JSON はエラーとなり何も描画されない
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        let result = session.on_message("{oops");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidFrame(_))));
        assert!(session.view().entries().is_empty());
    }

    #[test]
    fn test_unrecognized_frame_is_ignored() {
        // テスト項目: 未知の形のフレームは無視される
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        let result = session.on_message(r#"{"type": "pub_key", "username": "bob", "key": "k"}"#);

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(session.view().entries().is_empty());
    }

    #[test]
    fn test_join_group_twice_keeps_one_sidebar_entry() {
        // テスト項目: 同じグループに二度参加してもサイドバーは一件のみ
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        session.join_group("rust").unwrap();
        session.join_group("rust").unwrap();

        // then (期待する結果):
        assert_eq!(session.view().sidebar(), &["rust".to_string()]);
        assert_eq!(
            session.take_outbound(),
            vec![
                OutboundFrame::join_group("rust"),
                OutboundFrame::join_group("rust")
            ]
        );
    }

    #[test]
    fn test_join_group_prompt_flow() {
        // テスト項目: /join でプロンプトが開き、次の行がグループ名として扱われる
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        session.handle_line("/join").unwrap();
        let request = session.line_request();
        session.handle_line(" rust ").unwrap();

        // then (期待する結果):
        assert_eq!(request.prompt, JOIN_GROUP_PROMPT);
        assert_eq!(session.mode(), InputMode::Compose);
        assert_eq!(session.target(), &Target::Group("rust".to_string()));
        assert_eq!(session.take_outbound(), vec![OutboundFrame::join_group("rust")]);
    }

    #[test]
    fn test_blank_join_prompt_answer_does_nothing() {
        // テスト項目: グループ名プロンプトへの空回答では何も起きない
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group_prompt();

        // when (操作):
        session.handle_line("   ").unwrap();

        // then (期待する結果):
        assert_eq!(session.mode(), InputMode::Compose);
        assert!(session.take_outbound().is_empty());
        assert!(session.view().sidebar().is_empty());
        assert_eq!(session.target(), &Target::Unset);
    }

    #[test]
    fn test_interrupt_cancels_join_prompt_then_quits() {
        // テスト項目: Ctrl+C はプロンプト中ならキャンセル、それ以外なら終了になる
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group_prompt();

        // when (操作):
        let first = session.handle_interrupt();
        let second = session.handle_interrupt();

        // then (期待する結果):
        assert_eq!(first, InputOutcome::Continue);
        assert_eq!(second, InputOutcome::Quit);
    }

    #[test]
    fn test_switch_clears_log_and_announces() {
        // テスト項目: グループ切り替えでログが消去され、通知が一件だけ追加される
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("a").unwrap();
        session
            .on_message(r#"{"type": "group", "group": "a", "from": "bob", "content": "1"}"#)
            .unwrap();
        session.join_group("b").unwrap();
        session.set_input("x");
        session.send_message().unwrap();

        // when (操作):
        session.handle_line("/switch a").unwrap();

        // then (期待する結果):
        assert_eq!(session.view().bubble_count(), 0);
        assert_eq!(
            system_texts(&session),
            vec!["Switched to channel #a".to_string()]
        );
        assert_eq!(session.view().channel_label(), Some("# a"));
    }

    #[test]
    fn test_switch_to_unjoined_group_is_rejected() {
        // テスト項目: 未参加のグループには切り替えられない
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        let result = session.handle_line("/switch nowhere");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::UnknownGroup(g)) if g == "nowhere"));
        assert_eq!(session.target(), &Target::Unset);
    }

    #[test]
    fn test_send_message_echoes_locally_once() {
        // テスト項目: 送信したメッセージは即座に自分のバブルとして一件描画される
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("g1").unwrap();
        session.take_outbound();

        // when (操作):
        session.handle_line("  hello  ").unwrap();

        // then (期待する結果):
        assert_eq!(
            session.take_outbound(),
            vec![OutboundFrame::group("g1", "hello")]
        );
        assert_eq!(bubbles(&session), vec![("You".to_string(), "hello".to_string())]);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_send_without_target_keeps_input() {
        // テスト項目: 送信先未選択で送信するとエラーとなり入力は保持される
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        let result = session.handle_line("hello");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::NoTarget)));
        assert_eq!(session.input(), "hello");
        assert!(session.take_outbound().is_empty());
        assert_eq!(session.line_request().initial, "hello");
    }

    #[test]
    fn test_send_blank_input_is_noop() {
        // テスト項目: 空白のみの入力は送信されない
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("g1").unwrap();
        session.take_outbound();

        // when (操作):
        let result = session.handle_line("   ");

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(session.take_outbound().is_empty());
        assert_eq!(session.view().bubble_count(), 0);
    }

    #[test]
    fn test_actions_after_close_are_rejected() {
        // テスト項目: 切断後はグループ参加できない
        // given (前提条件):
        let mut session = logged_in("me");
        session.on_close();

        // when (操作):
        let result = session.join_group("g1");

        // then (期待する結果):
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(result, Err(ClientError::NotConnected)));
    }

    #[test]
    fn test_prompt_shows_user_and_group() {
        // テスト項目: プロンプトにユーザー名と現在のグループが表示される
        // given (前提条件):
        let mut session = logged_in("alice");

        // when (操作):
        let before = session.line_request();
        session.join_group("rust").unwrap();
        let after = session.line_request();

        // then (期待する結果):
        assert_eq!(before.prompt, "alice> ");
        assert_eq!(after.prompt, "alice#rust> ");
    }

    #[test]
    fn test_commands_map_to_outcomes() {
        // テスト項目: 表示系コマンドと終了コマンドが対応する結果を返す
        // given (前提条件):
        let mut session = logged_in("alice");

        // when (操作):
        let outcomes = [
            session.handle_line("/groups").unwrap(),
            session.handle_line("/help").unwrap(),
            session.handle_line("/quit").unwrap(),
        ];

        // then (期待する結果):
        assert_eq!(
            outcomes,
            [InputOutcome::ListGroups, InputOutcome::Help, InputOutcome::Quit]
        );
    }

    #[test]
    fn test_post_to_other_group_keeps_current_view() {
        // テスト項目: /group で別のグループに送信しても表示中のグループは変わらない
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("a").unwrap();
        session.join_group("b").unwrap();
        session.take_outbound();
        let before = session.view().entries().len();

        // when (操作):
        session.handle_line("/group a hello a").unwrap();

        // then (期待する結果):
        assert_eq!(
            session.take_outbound(),
            vec![OutboundFrame::group("a", "hello a")]
        );
        assert_eq!(session.target(), &Target::Group("b".to_string()));
        assert_eq!(session.view().entries().len(), before);
    }

    #[test]
    fn test_post_to_current_group_echoes_locally() {
        // テスト項目: /group で表示中のグループに送信すると自分のバブルが描画される
        // given (前提条件):
        let mut session = logged_in("me");
        session.join_group("a").unwrap();

        // when (操作):
        session.handle_line("/group a hi").unwrap();

        // then (期待する結果):
        assert_eq!(bubbles(&session), vec![("You".to_string(), "hi".to_string())]);
    }

    #[test]
    fn test_post_to_unjoined_group_is_rejected() {
        // テスト項目: 未参加のグループには /group で送信できない
        // given (前提条件):
        let mut session = logged_in("me");

        // when (操作):
        let result = session.handle_line("/group nowhere hi");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::UnknownGroup(g)) if g == "nowhere"));
        assert!(session.take_outbound().is_empty());
    }
}
