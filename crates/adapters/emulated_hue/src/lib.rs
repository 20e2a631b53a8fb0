//! # emuhue-adapter-emulated-hue
//!
//! Makes the hub discoverable as a Philips Hue bridge.
//!
//! ## How it works
//!
//! Hue clients multicast an SSDP `M-SEARCH` to `239.255.255.250:1900` and
//! follow the `LOCATION` header of any answer to `/description.xml`. This
//! adapter joins that group, answers every search with a pre-rendered
//! response, and leaves the description document to the HTTP adapter.
//!
//! | Search payload contains | Answered with `ST` |
//! |-------------------------|--------------------|
//! | `upnp:rootdevice` | `upnp:rootdevice` |
//! | anything else | `urn:schemas-upnp-org:device:basic:1` |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `emuhue-app` and `emuhue-domain`.

mod config;
mod error;
pub mod local_ip;
pub mod socket;

pub use config::{EmulatedHueConfig, ResolvedHueConfig};
pub use error::EmulatedHueError;

use emuhue_app::ports::{DatagramSocket, Integration};
use emuhue_app::services::discovery_responder::{DiscoveryResponder, ResponderState};
use emuhue_domain::error::HubError;
use emuhue_domain::ssdp::ResponseTemplates;

use socket::{MulticastBinding, UdpTransport};

/// Integration answering Hue discovery requests.
pub struct EmulatedHueIntegration {
    config: ResolvedHueConfig,
    responder: Option<DiscoveryResponder>,
}

impl EmulatedHueIntegration {
    /// Create the integration; nothing is bound until `setup`.
    #[must_use]
    pub fn new(config: ResolvedHueConfig) -> Self {
        Self {
            config,
            responder: None,
        }
    }

    /// Resolved settings this integration advertises.
    #[must_use]
    pub fn config(&self) -> &ResolvedHueConfig {
        &self.config
    }

    /// Lifecycle state of the discovery responder.
    #[must_use]
    pub fn responder_state(&self) -> ResponderState {
        self.responder
            .as_ref()
            .map_or(ResponderState::Closed, DiscoveryResponder::state)
    }

    /// Start the responder on an already bound socket instead of the
    /// multicast one built by `setup`.
    ///
    /// Does nothing if a responder is already running.
    pub fn open_on<S>(&mut self, socket: S)
    where
        S: DatagramSocket + 'static,
    {
        if self.responder.is_some() {
            tracing::warn!("emulated Hue responder already running");
            return;
        }
        let templates = ResponseTemplates::new(&self.config.identity, self.config.advertise);
        self.responder = Some(DiscoveryResponder::open(socket, templates));
    }
}

impl Integration for EmulatedHueIntegration {
    fn name(&self) -> &'static str {
        "emulated_hue"
    }

    #[tracing::instrument(skip(self), fields(advertise = %self.config.advertise))]
    async fn setup(&mut self) -> Result<(), HubError> {
        if self.responder.is_some() {
            tracing::warn!("emulated Hue responder already running");
            return Ok(());
        }

        let binding = MulticastBinding::ssdp(self.config.interface, self.config.bind_multicast);
        let transport = UdpTransport::bind(&binding)?;
        self.open_on(transport);

        tracing::info!(
            serial = %self.config.identity.serial,
            "emulated Hue discovery ready"
        );
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn teardown(&mut self) -> Result<(), HubError> {
        if let Some(mut responder) = self.responder.take() {
            responder.close().await;
        }
        tracing::info!("emulated Hue integration stopped");
        Ok(())
    }
}
