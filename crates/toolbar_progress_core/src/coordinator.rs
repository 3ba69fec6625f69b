use crate::{
    Effect, Msg, PageClassifier, ProgressBarWidget, ProgressMediator, ProgressModel,
    ProgressSettings, ProgressViewBinder, TabSnapshot,
};

/// Wires the model, mediator and view binder around one progress-bar widget.
#[derive(Debug)]
pub struct LoadProgressCoordinator {
    mediator: ProgressMediator,
}

impl LoadProgressCoordinator {
    /// Builds the component graph and attaches to `initial_tab`.
    ///
    /// The returned effects must be executed by the host, exactly like the
    /// effects returned from [`LoadProgressCoordinator::handle`].
    pub fn new<W>(
        widget: W,
        settings: ProgressSettings,
        classifier: Box<dyn PageClassifier>,
        initial_tab: Option<TabSnapshot>,
    ) -> (Self, Vec<Effect>)
    where
        W: ProgressBarWidget + 'static,
    {
        let mut model = ProgressModel::new();
        model.add_observer(Box::new(ProgressViewBinder::new(widget)));
        let mut mediator = ProgressMediator::new(model, settings, classifier);
        let effects = mediator.update(Msg::ActiveTabChanged(initial_tab));
        (Self { mediator }, effects)
    }

    pub fn handle(&mut self, msg: Msg) -> Vec<Effect> {
        self.mediator.update(msg)
    }

    pub fn destroy(&mut self) -> Vec<Effect> {
        self.mediator.update(Msg::Destroy)
    }

    pub fn set_prevent_updates(&mut self, prevent: bool) {
        self.mediator.update(Msg::SetPreventUpdates(prevent));
    }

    pub fn simulate_load_progress_completion(&mut self) -> Vec<Effect> {
        self.mediator.update(Msg::SimulateCompletion)
    }

    pub fn model(&self) -> &ProgressModel {
        self.mediator.model()
    }

    pub fn mediator(&self) -> &ProgressMediator {
        &self.mediator
    }
}
