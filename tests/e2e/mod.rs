// End-to-end tests for the speech backend HTTP API
//
// Each test starts the real router on an ephemeral port. External
// collaborators are replaced per test:
// - the synthesis provider is a wiremock server
// - the audio store is an object_store InMemory store
// - the history store is an in-memory repository
//
// Nothing is shared between tests, so they run in parallel.

mod helpers;
mod test_health;
