mod common;

// crates.io
use oauth2::http::StatusCode;
// self
use common::*;
use oauth_client_kit::{
	error::{Error, FlowError},
	flows::{GrantType, Phase},
};

const TOKEN_BODY: &str = "{\"access_token\":\"rotated\",\"token_type\":\"bearer\"}";

#[tokio::test]
async fn refresh_falls_back_to_the_access_token_uri() {
	let http_client = RecordingHttpClient::new(StatusCode::OK, TOKEN_BODY);
	let mut flow = flow_builder("https://provider.example.com")
		.build_with_http_client(http_client.clone())
		.expect("Flow should build.");
	let token = flow.refresh_access_token("refresh-1").await.expect("Refresh should succeed.");

	assert_eq!(token.access_token.expose(), "rotated");
	assert_eq!(flow.token_result().map(|t| t.access_token.expose()), Some("rotated"));
	http_client.with_requests(|requests| {
		let body = String::from_utf8_lossy(requests[0].body()).into_owned();

		assert_eq!(requests[0].uri().to_string(), "https://provider.example.com/token");
		assert!(body.contains("grant_type=refresh_token"));
		assert!(body.contains("refresh_token=refresh-1"));
		assert!(!body.contains("redirect_uri"));
	});
}

#[tokio::test]
async fn refresh_uses_dedicated_uri_and_overrides() {
	let http_client = RecordingHttpClient::new(StatusCode::OK, TOKEN_BODY);
	let mut flow = flow_builder("https://provider.example.com")
		.refresh_token_uri(url("https://provider.example.com/refresh"))
		.property(Phase::Refresh, "grant_type", "urn:custom:refresh")
		.build_with_http_client(http_client.clone())
		.expect("Flow should build.");

	flow.refresh_access_token("refresh-1").await.expect("First refresh should succeed.");
	flow.refresh_access_token("refresh-2").await.expect("Second refresh should succeed.");

	assert_eq!(http_client.calls(), 2);
	assert_eq!(flow.properties(Phase::Refresh).get("refresh_token"), Some("refresh-2"));
	http_client.with_requests(|requests| {
		let body = String::from_utf8_lossy(requests[1].body()).into_owned();

		assert_eq!(requests[1].uri().path(), "/refresh");
		assert!(body.contains("grant_type=urn%3Acustom%3Arefresh"));
		assert!(body.contains("refresh_token=refresh-2"));
	});
}

#[tokio::test]
async fn rejected_refresh_reports_status() {
	let http_client =
		RecordingHttpClient::new(StatusCode::UNAUTHORIZED, "{\"error\":\"invalid_client\"}");
	let mut flow = flow_builder("https://provider.example.com")
		.build_with_http_client(http_client)
		.expect("Flow should build.");
	let err = flow.refresh_access_token("refresh-1").await.expect_err("401 must fail.");

	assert!(matches!(
		err,
		Error::Flow(FlowError::TokenEndpoint { grant: GrantType::RefreshToken, status: 401 })
	));
	assert!(flow.token_result().is_none());
}

#[cfg(feature = "reqwest")]
#[tokio::test]
async fn refresh_round_trips_over_http() -> color_eyre::Result<()> {
	// crates.io
	use httpmock::prelude::*;

	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "refresh-1")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("client_secret", CLIENT_SECRET);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"rotated\",\"expires_in\":\"120\"}");
		})
		.await;
	let mut flow =
		flow_builder(&server.base_url()).build_with_http_client(test_reqwest_http_client())?;
	let token = flow.refresh_access_token("refresh-1").await?;

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "rotated");
	assert_eq!(token.expires_in, Some(time::Duration::seconds(120)));

	Ok(())
}

#[cfg(feature = "reqwest")]
#[tokio::test]
async fn rejected_refresh_keeps_previous_token() -> color_eyre::Result<()> {
	// crates.io
	use httpmock::prelude::*;

	let server = MockServer::start_async().await;
	let good = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").form_urlencoded_tuple("refresh_token", "refresh-1");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let bad = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").form_urlencoded_tuple("refresh_token", "revoked");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\"}");
		})
		.await;
	let mut flow =
		flow_builder(&server.base_url()).build_with_http_client(test_reqwest_http_client())?;

	flow.refresh_access_token("refresh-1").await?;

	let err = flow.refresh_access_token("revoked").await.expect_err("400 must fail the refresh.");

	good.assert_calls_async(1).await;
	bad.assert_calls_async(1).await;

	assert!(matches!(
		err,
		Error::Flow(FlowError::TokenEndpoint { grant: GrantType::RefreshToken, status: 400 })
	));
	assert_eq!(flow.token_result().map(|t| t.access_token.expose()), Some("rotated"));

	Ok(())
}
