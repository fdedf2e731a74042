//! Small talk and canned replies

use crate::context::Context;
use crate::phrases;

pub(super) async fn farewell(ctx: &mut Context) {
    let line = ctx.session.pick(phrases::FAREWELLS);
    ctx.respond(line).await;
}

pub(super) async fn joke(ctx: &mut Context) {
    let line = ctx.session.pick(phrases::JOKES);
    ctx.respond(line).await;
}

pub(super) async fn greeting(ctx: &mut Context) {
    let line = ctx.session.pick(phrases::GREETINGS);
    ctx.respond(line).await;
}

pub(super) async fn not_understood(ctx: &mut Context) {
    let line = ctx.session.pick(phrases::NOT_UNDERSTOOD);
    ctx.respond(line).await;
}

pub(super) async fn identity(ctx: &mut Context) {
    ctx.respond(phrases::IDENTITY).await;
}

pub(super) async fn help(ctx: &mut Context) {
    ctx.respond(phrases::HELP).await;
}

pub(super) async fn how_are_you(ctx: &mut Context) {
    ctx.respond(phrases::HOW_ARE_YOU).await;
}

pub(super) async fn thanks(ctx: &mut Context) {
    ctx.respond(phrases::THANKS).await;
}
