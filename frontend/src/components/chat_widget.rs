use std::collections::VecDeque;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Element, HtmlTextAreaElement};
use yew::prelude::*;

use crate::chat::{is_sendable, Sender, Transcript};
use crate::config::ChatConfig;
use crate::faq::{respond, KnowledgeBase};

#[derive(Properties, PartialEq)]
pub struct ChatWidgetProps {
    pub knowledge_base: Rc<KnowledgeBase>,
    #[prop_or_default]
    pub config: ChatConfig,
}

pub enum ChatWidgetMsg {
    Toggle,
    SetInput(String),
    Send,
    Reply(String),
}

pub struct ChatWidget {
    open: bool,
    input: String,
    transcript: Transcript,
    // One timer per unanswered question, oldest first. Dropping the widget cancels them.
    pending: VecDeque<Timeout>,
    messages_end: NodeRef,
    // Transcript length at the last scroll, so typing alone doesn't yank the view.
    scrolled_len: usize,
}

/// Scroll to the newest message only when something was appended since the last scroll.
fn needs_scroll(first_render: bool, scrolled_len: usize, transcript_len: usize) -> bool {
    first_render || transcript_len > scrolled_len
}

impl Component for ChatWidget {
    type Message = ChatWidgetMsg;
    type Properties = ChatWidgetProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            open: false,
            input: String::new(),
            transcript: Transcript::with_greeting(&ctx.props().config.greeting),
            pending: VecDeque::new(),
            messages_end: NodeRef::default(),
            scrolled_len: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatWidgetMsg::Toggle => {
                self.open = !self.open;
                true
            }
            ChatWidgetMsg::SetInput(input) => {
                self.input = input;
                true
            }
            ChatWidgetMsg::Send => {
                if !is_sendable(&self.input) {
                    return false;
                }

                let question = std::mem::take(&mut self.input);
                let reply = respond(&question, &ctx.props().knowledge_base).to_string();
                debug!("Queued reply for {:?}", question);
                self.transcript.push(Sender::User, question);

                let link = ctx.link().clone();
                let timeout = Timeout::new(ctx.props().config.reply_delay_ms, move || {
                    link.send_message(ChatWidgetMsg::Reply(reply));
                });
                self.pending.push_back(timeout);
                true
            }
            ChatWidgetMsg::Reply(reply) => {
                self.pending.pop_front();
                self.transcript.push(Sender::Bot, reply);
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !needs_scroll(first_render, self.scrolled_len, self.transcript.len()) {
            return;
        }
        // The list only exists while the panel is open; retry on the next render otherwise.
        if let Some(end) = self.messages_end.cast::<Element>() {
            end.scroll_into_view();
            self.scrolled_len = self.transcript.len();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let toggle = ctx.link().callback(|_| ChatWidgetMsg::Toggle);

        html! {
            <div class="chat-widget">
                if self.open {
                    { self.render_panel(ctx) }
                } else {
                    <button class="chat-widget-launcher" onclick={toggle} aria-label="Open chat">
                        { "💬" }
                    </button>
                }
                <style>
                    {r#"
                    .chat-widget {
                        position: fixed;
                        bottom: 1.5rem;
                        right: 1.5rem;
                        z-index: 50;
                        font-family: inherit;
                    }
                    .chat-widget-launcher {
                        width: 3.5rem;
                        height: 3.5rem;
                        border-radius: 50%;
                        border: none;
                        background: #2563eb;
                        color: #fff;
                        font-size: 1.5rem;
                        cursor: pointer;
                        box-shadow: 0 10px 25px rgba(0, 0, 0, 0.3);
                    }
                    .chat-panel {
                        width: 24rem;
                        max-width: calc(100vw - 3rem);
                        height: 24rem;
                        display: flex;
                        flex-direction: column;
                        background: #1f2937;
                        border: 1px solid #374151;
                        border-radius: 1rem;
                        overflow: hidden;
                        box-shadow: 0 20px 40px rgba(0, 0, 0, 0.4);
                    }
                    .chat-header {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        padding: 0.75rem 1rem;
                        background: #1d4ed8;
                        color: #fff;
                    }
                    .chat-header h3 {
                        margin: 0;
                        font-size: 1rem;
                        font-weight: 500;
                    }
                    .chat-close {
                        background: none;
                        border: none;
                        color: #fff;
                        cursor: pointer;
                    }
                    .chat-messages {
                        flex: 1;
                        overflow-y: auto;
                        padding: 1rem;
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                    }
                    .chat-row {
                        display: flex;
                    }
                    .chat-row.user {
                        justify-content: flex-end;
                    }
                    .chat-row.bot {
                        justify-content: flex-start;
                    }
                    .chat-bubble {
                        max-width: 80%;
                        padding: 0.5rem 1rem;
                        border-radius: 0.5rem;
                    }
                    .chat-row.user .chat-bubble {
                        background: #3b82f6;
                        color: #fff;
                    }
                    .chat-row.bot .chat-bubble {
                        background: #374151;
                        color: #e5e7eb;
                    }
                    .chat-text {
                        margin: 0;
                        white-space: pre-line;
                    }
                    .chat-time {
                        margin: 0.25rem 0 0;
                        font-size: 0.75rem;
                        opacity: 0.7;
                    }
                    .typing-dots span {
                        display: inline-block;
                        width: 0.5rem;
                        height: 0.5rem;
                        margin-right: 0.25rem;
                        border-radius: 50%;
                        background: #9ca3af;
                        animation: chat-bounce 1s infinite;
                    }
                    .typing-dots span:nth-child(2) { animation-delay: 0.2s; }
                    .typing-dots span:nth-child(3) { animation-delay: 0.4s; }
                    @keyframes chat-bounce {
                        0%, 100% { transform: translateY(0); }
                        50% { transform: translateY(-25%); }
                    }
                    .chat-input {
                        display: flex;
                        gap: 0.5rem;
                        padding: 0.75rem;
                        border-top: 1px solid #374151;
                    }
                    .chat-input textarea {
                        flex: 1;
                        min-height: 44px;
                        max-height: 120px;
                        resize: none;
                        font-size: 0.875rem;
                        background: #111827;
                        color: #f3f4f6;
                        border: 1px solid #374151;
                        border-radius: 0.5rem;
                        padding: 0.5rem;
                    }
                    .chat-send {
                        width: 2.75rem;
                        height: 2.75rem;
                        border: none;
                        border-radius: 0.5rem;
                        background: #2563eb;
                        color: #fff;
                        cursor: pointer;
                    }
                    .chat-send:disabled {
                        opacity: 0.5;
                        cursor: not-allowed;
                    }
                    "#}
                </style>
            </div>
        }
    }
}

impl ChatWidget {
    fn render_panel(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let config = &ctx.props().config;

        let oninput = link.callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            ChatWidgetMsg::SetInput(input.value())
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                Some(ChatWidgetMsg::Send)
            } else {
                None
            }
        });

        html! {
            <div class="chat-panel">
                <div class="chat-header">
                    <h3>{ &config.title }</h3>
                    <button class="chat-close" onclick={link.callback(|_| ChatWidgetMsg::Toggle)} aria-label="Close chat">
                        { "✕" }
                    </button>
                </div>

                <div class="chat-messages">
                    { for self.transcript.messages().iter().map(|message| html! {
                        <div class={classes!("chat-row", message.sender().css_class())}>
                            <div class="chat-bubble">
                                <p class="chat-text">{ message.text() }</p>
                                <p class="chat-time">{ message.time_label() }</p>
                            </div>
                        </div>
                    }) }

                    if !self.pending.is_empty() {
                        <div class="chat-row bot">
                            <div class="chat-bubble typing-dots">
                                <span></span>
                                <span></span>
                                <span></span>
                            </div>
                        </div>
                    }

                    <div ref={self.messages_end.clone()}></div>
                </div>

                <div class="chat-input">
                    <textarea
                        rows="1"
                        placeholder={config.placeholder.clone()}
                        value={self.input.clone()}
                        {oninput}
                        {onkeydown}
                    />
                    <button
                        class="chat-send"
                        onclick={link.callback(|_| ChatWidgetMsg::Send)}
                        disabled={!is_sendable(&self.input)}
                        aria-label="Send"
                    >
                        { "➤" }
                    </button>
                </div>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::needs_scroll;

    #[test]
    fn typing_does_not_scroll() {
        // Re-render from a keystroke: nothing appended since the last scroll.
        assert!(!needs_scroll(false, 3, 3));
    }

    #[test]
    fn new_message_scrolls() {
        assert!(needs_scroll(false, 1, 2));
        assert!(needs_scroll(false, 1, 3));
    }

    #[test]
    fn first_render_scrolls() {
        assert!(needs_scroll(true, 0, 1));
        assert!(needs_scroll(true, 1, 1));
    }
}
