use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::service::{AuthService, AuthConfig};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::domain::{RegisterInput, VerifyOtpInput, LoginInput};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(
        repo.clone(),
        AuthConfig { jwt_secret: Some("secret".into()), ..AuthConfig::default() },
    );

    // pre-create and verify a user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        first_name: "Bench".into(),
        last_name: "User".into(),
        email: "bench@example.com".into(),
        phone: "+998901234567".into(),
        password: "Benchmark1".into(),
    }));
    let code = rt
        .block_on(repo.latest_otp("bench@example.com"))
        .unwrap()
        .unwrap()
        .code;
    let _ = rt.block_on(svc.verify_otp(VerifyOtpInput { email: "bench@example.com".into(), code }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
