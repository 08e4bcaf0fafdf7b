use client_core::{
    AggregatorError, ExecutionError, SessionController, SwapWorkflow, TokenSource,
    WalletConnector, WalletError,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Token, TokenAddress, View};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{category_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, navigate, Navigation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenSide {
    From,
    To,
}

impl TokenSide {
    fn label(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
        }
    }

    fn combo_id(self) -> &'static str {
        match self {
            Self::From => "from_token_combo",
            Self::To => "to_token_combo",
        }
    }
}

pub struct SwapDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: SessionController,
    workflow: SwapWorkflow,
    network: String,
    wallet_prompt_open: bool,
    connecting: bool,
    status: String,
    banner: Option<UiError>,
    last_trade: Option<String>,
}

impl SwapDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        workflow: SwapWorkflow,
        network: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: SessionController::new(),
            workflow,
            network,
            wallet_prompt_open: false,
            connecting: false,
            status: "Connect a wallet to start swapping".to_string(),
            banner: None,
            last_trade: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::WalletResolved(result) => {
                    self.connecting = false;
                    let notice = WalletConnector::complete_connect(&mut self.session, result);
                    if self.session.is_connected() {
                        self.status = notice.message;
                        self.banner = None;
                        self.request_token_list();
                    } else {
                        self.banner = Some(UiError::from_notice(UiErrorContext::Wallet, &notice));
                    }
                }
                UiEvent::TokensLoaded { ticket, result } => {
                    match self.workflow.finish_load_tokens(ticket, result) {
                        Some(TokenSource::Remote) => {
                            self.status = format!("{} tokens available", self.workflow.tokens().len());
                        }
                        Some(TokenSource::Fallback) => {
                            self.status = "Using the default token set".to_string();
                        }
                        None => {}
                    }
                }
                UiEvent::QuoteFetched { ticket, result } => {
                    match self.workflow.finish_quote(ticket, result) {
                        Some(Ok(())) => self.status = "Quote received".to_string(),
                        Some(Err(err)) => self.status = format!("Quote failed: {err}"),
                        None => {}
                    }
                }
                UiEvent::TradeFinished { ticket, result } => {
                    match self.workflow.finish_execute(ticket, result) {
                        Some(Ok(summary)) => {
                            self.status = summary.to_string();
                            self.last_trade = Some(summary.to_string());
                        }
                        Some(Err(err)) => self.status = format!("Swap failed: {err}"),
                        None => {}
                    }
                }
                UiEvent::Error(err) => {
                    self.status = err.message().to_string();
                    self.banner = Some(err);
                }
            }
        }
    }

    fn request_token_list(&mut self) {
        let ticket = match self.workflow.begin_load_tokens(&self.session) {
            Ok(ticket) => ticket,
            Err(err) => {
                self.banner = Some(UiError::from_notice(UiErrorContext::TokenList, &err.notice()));
                return;
            }
        };
        let cmd = BackendCommand::LoadTokens {
            ticket: ticket.clone(),
        };
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.banner = Some(UiError::from_message(UiErrorContext::TokenList, &self.status));
            let err = AggregatorError::transport("asset-list", &self.status);
            self.workflow.finish_load_tokens(ticket, Err(err));
        }
    }

    fn request_quote(&mut self) {
        self.last_trade = None;
        let ticket = match self.workflow.begin_quote(&self.session) {
            Ok(ticket) => ticket,
            Err(err) => {
                tracing::debug!("quote blocked: {err}");
                return;
            }
        };
        let cmd = BackendCommand::FetchQuote {
            ticket: ticket.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.status = "Fetching quote...".to_string();
        } else {
            self.banner = Some(UiError::from_message(UiErrorContext::Quote, &self.status));
            let err = AggregatorError::transport("quote", &self.status);
            self.workflow.finish_quote(ticket, Err(err));
        }
    }

    fn request_execute(&mut self) {
        let ticket = match self.workflow.begin_execute(&self.session) {
            Ok(ticket) => ticket,
            Err(err) => {
                tracing::debug!("execution blocked: {err}");
                return;
            }
        };
        let cmd = BackendCommand::ExecuteTrade {
            ticket: ticket.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.status = "Executing swap...".to_string();
        } else {
            self.banner = Some(UiError::from_message(UiErrorContext::Execute, &self.status));
            let err = ExecutionError::Failed(self.status.clone());
            let _ = self.workflow.finish_execute(ticket, Err(err));
        }
    }

    fn approve_wallet_prompt(&mut self) {
        self.wallet_prompt_open = false;
        if dispatch_backend_command(&self.cmd_tx, BackendCommand::ConnectWallet, &mut self.status)
        {
            self.connecting = true;
            self.status = "Waiting for wallet...".to_string();
        }
    }

    fn reject_wallet_prompt(&mut self) {
        self.wallet_prompt_open = false;
        let notice = WalletConnector::complete_connect(&mut self.session, Err(WalletError::Rejected));
        self.status = notice.message.clone();
        self.banner = Some(UiError::from_notice(UiErrorContext::Wallet, &notice));
    }

    fn disconnect_wallet(&mut self) {
        let notice = WalletConnector::disconnect(&mut self.session);
        self.workflow.reset();
        self.status = notice.message;
        self.banner = None;
        self.last_trade = None;
    }

    fn go_to_view(&mut self, view: View) {
        let tokens_missing =
            self.workflow.tokens().is_empty() && !self.workflow.is_loading_tokens();
        match navigate(&mut self.session, view, tokens_missing) {
            Navigation::Unchanged => {}
            Navigation::Moved { load_tokens } => {
                if load_tokens {
                    self.request_token_list();
                }
            }
            Navigation::Blocked(err) => {
                self.status = err.message().to_string();
                self.banner = Some(err);
                if !self.session.is_connected() && !self.connecting {
                    self.wallet_prompt_open = true;
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Token Swap");
                ui.separator();

                let mut view = self.session.current_view();
                ui.selectable_value(&mut view, View::Landing, "Home");
                ui.selectable_value(&mut view, View::Swap, "Swap");
                if view != self.session.current_view() {
                    self.go_to_view(view);
                }

                let wallet = self
                    .session
                    .wallet_address()
                    .map(|address| TokenAddress::from(address).short());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(wallet) = wallet {
                        if ui.button("Disconnect").clicked() {
                            self.disconnect_wallet();
                        } else {
                            ui.monospace(wallet);
                        }
                    } else if self.connecting {
                        ui.spinner();
                        ui.label("Connecting...");
                    } else if ui.button("Connect wallet").clicked() {
                        self.wallet_prompt_open = true;
                    }
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("network: {}", self.network));
                });
            });
        });
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(err) = &self.banner else {
            return;
        };
        let mut dismissed = false;
        egui::Frame::NONE
            .fill(ui.visuals().extreme_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{}: {}", category_label(err.category()), err.message()),
                    );
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.banner = None;
        }
        ui.add_space(8.0);
    }

    fn show_wallet_prompt(&mut self, ctx: &egui::Context) {
        if !self.wallet_prompt_open {
            return;
        }
        let mut approve = false;
        let mut reject = false;
        egui::Window::new("Connect wallet")
            .id(egui::Id::new("wallet_prompt_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Allow this app to read your wallet's public key?");
                ui.weak("Your keys never leave the wallet.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    approve = ui.button("Approve").clicked();
                    reject = ui.button("Reject").clicked();
                });
            });
        if approve {
            self.approve_wallet_prompt();
        } else if reject {
            self.reject_wallet_prompt();
        }
    }

    fn show_landing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.15);
            ui.heading("Swap tokens at the best available rate");
            ui.label("Quotes are aggregated across several on-chain liquidity venues.");
            ui.add_space(16.0);
            let label = if self.session.is_connected() {
                "Start swapping"
            } else {
                "Connect wallet"
            };
            if ui
                .add_enabled(!self.connecting, egui::Button::new(label))
                .clicked()
            {
                self.go_to_view(View::Swap);
            }
        });
    }

    fn token_picker(&mut self, ui: &mut egui::Ui, side: TokenSide, tokens: &[Token]) {
        let current = match side {
            TokenSide::From => self.workflow.form().from_token.clone(),
            TokenSide::To => self.workflow.form().to_token.clone(),
        };
        let selected_text = current
            .as_ref()
            .map(|address| self.workflow.token_symbol(address))
            .unwrap_or_else(|| "Select token".to_string());

        let mut chosen = current.clone();
        ui.horizontal(|ui| {
            ui.label(side.label());
            egui::ComboBox::from_id_salt(side.combo_id())
                .selected_text(selected_text)
                .width(220.0)
                .show_ui(ui, |ui| {
                    for token in tokens {
                        ui.selectable_value(
                            &mut chosen,
                            Some(token.address.clone()),
                            format!("{} ({})", token.symbol, token.name),
                        );
                    }
                });
        });

        if chosen != current {
            if let Some(address) = chosen {
                match side {
                    TokenSide::From => self.workflow.select_from_token(address),
                    TokenSide::To => self.workflow.select_to_token(address),
                }
            }
        }
    }

    fn show_swap(&mut self, ui: &mut egui::Ui) {
        if let Some(notice) = self.workflow.advisory_notice() {
            ui.colored_label(ui.visuals().warn_fg_color, &notice.message);
        }
        if self.workflow.is_loading_tokens() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading tokens...");
            });
        }

        let tokens = self.workflow.tokens().to_vec();
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_max_width(460.0);
                self.token_picker(ui, TokenSide::From, &tokens);

                let mut amount = self.workflow.form().amount_text.clone();
                ui.horizontal(|ui| {
                    ui.label("Amount");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut amount)
                            .hint_text("0.0")
                            .desired_width(220.0),
                    );
                    if response.changed() {
                        self.workflow.set_amount(amount);
                    }
                });

                if ui.button("⇅ Reverse").clicked() {
                    self.workflow.reverse_tokens();
                }

                self.token_picker(ui, TokenSide::To, &tokens);
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let loading = self.workflow.is_loading_quote();
                    if ui
                        .add_enabled(!loading, egui::Button::new("Get quote"))
                        .clicked()
                    {
                        self.request_quote();
                    }
                    if loading {
                        ui.spinner();
                    }
                });
            });

        if let Some(error) = self.workflow.error() {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        self.show_quote(ui);

        if let Some(trade) = &self.last_trade {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::from_rgb(80, 180, 110), trade);
        }
    }

    fn show_quote(&mut self, ui: &mut egui::Ui) {
        let Some(breakdown) = self.workflow.breakdown() else {
            return;
        };

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label("You receive");
            ui.strong(&breakdown.you_receive);
        });

        let toggle_label = if self.workflow.details_open() {
            "Hide details"
        } else {
            "Show details"
        };
        if ui.small_button(toggle_label).clicked() {
            self.workflow.toggle_details();
        }

        if self.workflow.details_open() {
            egui::Grid::new("quote_breakdown")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in breakdown.rows() {
                        ui.label(label);
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let executing = self.workflow.is_executing();
            if ui
                .add_enabled(!executing, egui::Button::new("Execute swap"))
                .clicked()
            {
                self.request_execute();
            }
            if executing {
                ui.spinner();
                ui.label("Submitting...");
            }
        });
    }
}

impl eframe::App for SwapDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_wallet_prompt(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_banner(ui);
            match self.session.current_view() {
                View::Landing => self.show_landing(ui),
                View::Swap => self.show_swap(ui),
            }
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
