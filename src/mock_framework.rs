//! # Mock Framework
//!
//! Utilities for testing code that talks to the user service without running it.
//!
//! Use [`create_mock_client`] to get a [`UserClient`] and the receiver its
//! requests land on, then answer them with helpers like [`expect_verify`].

use tokio::sync::mpsc;

use crate::clients::UserClient;
use crate::domain::{UserCreate, UserRecord};
use crate::error::UserError;
use crate::messages::{Secret, ServiceResponse, UserRequest};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<UserRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender), receiver)
}

/// Helper to verify that the next message is a VerifyCredentials request
pub async fn expect_verify(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, Secret, ServiceResponse<Option<UserRecord>, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::VerifyCredentials { email, password, respond_to }) => Some((email, password, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CreateUser request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(UserCreate, ServiceResponse<UserRecord, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::CreateUser { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client.create_user(UserCreate::new("test@example.com", "pw", Role::Admin)).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.email, "test@example.com");
        let record = UserRecord::from_create(params, "pw".to_string());
        responder.send(Ok(record.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(record));
    }
}
