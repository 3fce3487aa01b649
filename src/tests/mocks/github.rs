use serde::Serialize;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::user::{default_user, User};
use super::World;

/// Open pull request of the simulated repository.
#[derive(Clone)]
pub struct PullRequest {
    pub branch: String,
    pub body: String,
    pub author: User,
}

impl PullRequest {
    pub fn new(branch: &str, body: &str) -> Self {
        Self {
            branch: branch.to_string(),
            body: body.to_string(),
            author: default_user(),
        }
    }
}

/// Element of the `GET /repos/{owner}/{repo}/pulls` response.
#[derive(Serialize)]
struct GitHubPullRequest {
    url: String,
    id: u64,
    number: u64,
    state: String,
    title: String,
    body: String,
    user: User,
    head: Head,
}

#[derive(Serialize)]
struct Head {
    label: String,
    #[serde(rename = "ref")]
    ref_field: String,
    sha: String,
}

pub struct GitHubMockServer {
    mock_server: MockServer,
}

impl GitHubMockServer {
    pub async fn start(world: &World) -> Self {
        let mock_server = MockServer::start().await;
        let pulls_path = format!("/repos/{}/pulls", world.repo);

        for (index, pr) in world.pull_requests.values().enumerate() {
            let number = index as u64 + 1;
            let head = format!("{}:{}", world.repo.owner(), pr.branch);
            let response = vec![GitHubPullRequest {
                url: format!("https://api.github.com{pulls_path}/{number}"),
                id: number,
                number,
                state: "open".to_string(),
                title: format!("PR #{number}"),
                body: pr.body.clone(),
                user: pr.author.clone(),
                head: Head {
                    label: head.clone(),
                    ref_field: pr.branch.clone(),
                    sha: "f5e3b0f2a81e1e5e1c9f3a7d0c2b4e6f8a0b1c2d".to_string(),
                },
            }];

            Mock::given(method("GET"))
                .and(path(pulls_path.clone()))
                .and(query_param("head", head))
                .respond_with(ResponseTemplate::new(200).set_body_json(response))
                .mount(&mock_server)
                .await;
        }

        // Branches without an open pull request
        Mock::given(method("GET"))
            .and(path(pulls_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<GitHubPullRequest>::new()))
            .with_priority(10)
            .mount(&mock_server)
            .await;

        Self { mock_server }
    }

    pub fn uri(&self) -> String {
        self.mock_server.uri()
    }

    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
    }
}
