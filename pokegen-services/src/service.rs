//! The base contract every service follows.

use pokegen_channel::Teardown;

/// A service with a teardown-scoped lifetime.
///
/// Pipelines wired in a service's constructor are scoped to the teardown
/// returned by [`Service::destroyed`]; firing it stops every pump the
/// service owns. [`Service::on_destroy`] is the hook for releasing
/// resources beyond subscriptions.
pub trait Service {
    /// The teardown signal subscriptions are scoped to.
    fn destroyed(&self) -> &Teardown;

    /// Hook to perform actions after the service is destroyed.
    fn on_destroy(&self) {}

    /// Destroys the service: fires the teardown, then runs the hook.
    fn destroy(&self) {
        self.destroyed().fire();
        self.on_destroy();
    }
}
