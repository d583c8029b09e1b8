//! Integration tests for pmopaint against a mock SOAP server

use mockito::{Matcher, Server};
use pmopaint::soap::{DEFAULT_NAMESPACE, build_handle_response, build_soap_fault};
use pmopaint::{
    BeanClass, BeanProcess, BeanType, Envelope, ErrorCode, PaintClient, PaintConfig, PaintError,
    RequestOutcome, encode, paint_map,
};

const SERVICE_PATH: &str = "/emailapi.co.uk/ctrlPaintLiteral";

fn response_xml(map: &pmopaint::PaintMap) -> String {
    build_handle_response(DEFAULT_NAMESPACE, encode(Some(map)).as_ref()).unwrap()
}

fn login_response_xml(context: &str) -> String {
    response_xml(&paint_map! {
        "result" => "success",
        "resultData" => paint_map! {
            "bus_entity_context" => paint_map! { "beanId" => context },
        },
    })
}

fn client_for(server: &Server) -> PaintClient {
    let config = PaintConfig::new("alice", "secret")
        .with_service_url(format!("{}{}", server.url(), SERVICE_PATH));
    PaintClient::from_config(&config).unwrap()
}

#[test]
fn test_login_search_logout() {
    let mut server = Server::new();

    let login = server
        .mock("POST", SERVICE_PATH)
        .match_header("SOAPAction", "\"urn:ctrlPaint#handleRequest\"")
        .match_header("Content-Type", Matcher::Regex("text/xml".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<processName>login</processName>".to_string()),
            Matcher::Regex("<className>bus_facade_context</className>".to_string()),
            Matcher::Regex("<str>alice</str>".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml; charset=utf-8")
        .with_body(login_response_xml("ctx-42"))
        .expect(1)
        .create();

    let search = server
        .mock("POST", SERVICE_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<processName>search</processName>".to_string()),
            Matcher::Regex("<context>ctx-42</context>".to_string()),
        ]))
        .with_status(200)
        .with_body(response_xml(&paint_map! {
            "result" => "success",
            "resultData" => paint_map! {
                "bus_search_campaign_list" => paint_map! { "idData" => paint_map! {} },
            },
        }))
        .expect(1)
        .create();

    let logout = server
        .mock("POST", SERVICE_PATH)
        .match_body(Matcher::Regex("<processName>logout</processName>".to_string()))
        .with_status(200)
        .with_body(build_handle_response(DEFAULT_NAMESPACE, None).unwrap())
        .expect(1)
        .create();

    let mut client = client_for(&server);

    let auth = client.authenticate().unwrap();
    assert_eq!(auth, Envelope::ok("ctx-42"));

    let criteria = paint_map! { "listName" => "weekly" };
    let outcome = client
        .search(BeanClass::CampaignList, Some(&criteria))
        .unwrap();
    let response = outcome.response().unwrap();
    let found = pmopaint::extract_result_data(
        response,
        Some(BeanType::Search.as_str()),
        Some(BeanClass::CampaignList.as_str()),
    )
    .unwrap();
    // Aucun enregistrement : mapping vide, pas absent
    assert_eq!(
        found.as_map().and_then(|m| m.get("idData")),
        Some(&pmopaint::PaintValue::Map(pmopaint::PaintMap::new()))
    );

    client.invalidate();
    assert!(!client.is_authenticated());

    login.assert();
    search.assert();
    logout.assert();
}

#[test]
fn test_rejected_credentials() {
    let mut server = Server::new();
    let login = server
        .mock("POST", SERVICE_PATH)
        .with_status(200)
        .with_body(response_xml(&paint_map! { "result" => "bean_exception_validation" }))
        .create();

    let mut client = client_for(&server);
    let auth = client.authenticate().unwrap();

    assert!(auth.is_err_code(ErrorCode::AuthParams));
    assert_eq!(
        auth.meta,
        Some(paint_map! { "result" => "bean_exception_validation" })
    );
    login.assert();
}

#[test]
fn test_unauthenticated_request_never_hits_the_server() {
    let mut server = Server::new();
    let any = server.mock("POST", Matcher::Any).expect(0).create();

    let client = client_for(&server);
    let outcome = client
        .make_request(
            BeanType::Entity,
            BeanClass::CampaignDelivery,
            BeanProcess::Create,
            None,
            None,
            false,
        )
        .unwrap();

    assert_eq!(outcome, RequestOutcome::NotAuthenticated);
    any.assert();
}

#[test]
fn test_soap_fault_is_propagated() {
    let mut server = Server::new();
    server
        .mock("POST", SERVICE_PATH)
        .with_status(500)
        .with_body(build_soap_fault("SOAP-ENV:Server", "Service unavailable").unwrap())
        .create();

    let mut client = client_for(&server);
    let err = client.authenticate().unwrap_err();

    match err {
        PaintError::SoapFault { code, message } => {
            assert_eq!(code, "SOAP-ENV:Server");
            assert_eq!(message, "Service unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_http_error_without_fault() {
    let mut server = Server::new();
    server
        .mock("POST", SERVICE_PATH)
        .with_status(503)
        .with_body("maintenance")
        .create();

    let mut client = client_for(&server);
    let err = client.authenticate().unwrap_err();

    assert!(matches!(err, PaintError::Http { status: 503, ref body } if body == "maintenance"));
    assert!(err.is_transport_error());
}

#[test]
fn test_logout_failure_is_swallowed() {
    let mut server = Server::new();
    server
        .mock("POST", SERVICE_PATH)
        .match_body(Matcher::Regex("<processName>login</processName>".to_string()))
        .with_status(200)
        .with_body(login_response_xml("ctx-1"))
        .create();
    server
        .mock("POST", SERVICE_PATH)
        .match_body(Matcher::Regex("<processName>logout</processName>".to_string()))
        .with_status(500)
        .with_body("boom")
        .create();

    let mut client = client_for(&server);
    assert!(client.authenticate().unwrap().ok);

    client.invalidate();

    assert_eq!(client.context(), None);
}
