use crate::gate::AdmissionGate;

// app's shared state

pub struct AppState {
    pub gate: AdmissionGate,
}
